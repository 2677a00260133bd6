use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use wp_app::*;
use wp_core::{Id, Real, Tolerances, nearly_equal};
use wp_emissions::{Co2, Nox};
use wp_plan::WellPlan;
use wp_timeseries::Window;

fn reference_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/reference_well.yaml")
}

fn reference() -> WellPlan {
    load_plan(&reference_path()).unwrap()
}

fn close(a: Real, b: Real) -> bool {
    nearly_equal(
        a,
        b,
        Tolerances {
            abs: 1e-8,
            rel: 1e-10,
        },
    )
}

fn planned_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

#[test]
fn first_planned_step_matches_reference_figures() {
    let plan = reference();
    let r = compute_planned_step(&plan, &Co2::new(plan.factors), Id::new(1).unwrap(), false)
        .unwrap();
    assert!(close(r.base, 766.5));
    assert!(close(r.baseline, 1620.366923616734));
    assert!(close(r.target, 1298.4369236167342));
    assert!(close(r.cement, 162.0));
    assert!(close(r.external_energy_supply, 96.47999999999999));
}

#[test]
fn unknown_step_is_reported() {
    let plan = reference();
    let err = compute_planned_step(&plan, &Nox, Id::new(42).unwrap(), false).unwrap_err();
    assert!(matches!(err, AppError::StepNotFound(_)));
}

#[test]
fn productivity_initiative_shortens_the_plan() {
    let plan = reference();
    let (total, improved) = planned_durations(&plan).unwrap();
    assert!(close(total, 37.05));
    assert!(close(improved, 10.0 + 27.05 * 0.9));
}

#[test]
fn daily_dataset_conserves_plan_total() {
    let plan = reference();
    let co2 = Co2::new(plan.factors);
    let dataset = compute_plan_daily_dataset(&plan, &co2, false).unwrap();
    let total = compute_plan_total(&plan, &co2, false).unwrap();

    let sum: Real = dataset.iter().map(|p| p.emissions.baseline).sum();
    assert!(close(sum, total.baseline));

    let first_step: Vec<_> = dataset
        .iter()
        .filter(|p| p.step == Id::new(1).unwrap())
        .collect();
    assert_eq!(first_step.len(), 10);
    assert_eq!(first_step[0].at, planned_start());
    let step_sum: Real = first_step.iter().map(|p| p.emissions.baseline).sum();
    assert!(close(step_sum, 1620.366923616734));

    // points come out in step order
    let last_first = dataset.iter().rposition(|p| p.step == Id::new(1).unwrap());
    let first_second = dataset.iter().position(|p| p.step == Id::new(2).unwrap());
    assert!(last_first < first_second);
}

#[test]
fn hourly_dataset_is_clipped_to_the_window() {
    let plan = reference();
    let co2 = Co2::new(plan.factors);
    let window = Window::new(
        planned_start() + TimeDelta::hours(6),
        planned_start() + TimeDelta::hours(17),
    );
    let dataset = compute_plan_windowed_dataset(&plan, &co2, false, window).unwrap();
    assert_eq!(dataset.len(), 12);
    assert!(dataset.iter().all(|p| window.contains(p.at)));

    let step = compute_planned_step(&plan, &co2, Id::new(1).unwrap(), false).unwrap();
    let hour_share = step.baseline / (10.0 * 24.0);
    assert!(dataset.iter().all(|p| close(p.emissions.baseline, hour_share)));
}

#[test]
fn hourly_dataset_outside_the_plan_is_empty() {
    let plan = reference();
    let window = Window::new(
        planned_start() - TimeDelta::days(10),
        planned_start() - TimeDelta::days(2),
    );
    let dataset = compute_plan_windowed_dataset(&plan, &Nox, false, window).unwrap();
    assert!(dataset.is_empty());
}

#[test]
fn summary_adds_up_improved_steps() {
    let plan = reference();
    let summary = compute_plan_summary(&plan).unwrap();
    let total = compute_plan_total(&plan, &Co2::new(plan.factors), true).unwrap();
    assert!(close(summary.total_baseline, total.baseline));
    assert!(close(summary.total_target, total.target));
    assert!(close(summary.total_improved_duration, 34.345));
}

#[test]
fn saved_co2_follows_the_improved_plan() {
    let plan = reference();
    let saved = compute_saved_co2_dataset(&plan, None).unwrap();
    let improvement = compute_improvement(&plan, &Co2::new(plan.factors)).unwrap();

    assert_eq!(saved.len(), 4);
    assert_eq!(saved[0].at, planned_start() + TimeDelta::days(34));
    assert!(improvement.baseline > 0.0);
    let sum: Real = saved.iter().map(|p| p.emissions.baseline).sum();
    assert!(close(sum, improvement.baseline));
    assert!(saved.iter().all(|p| p.emissions.baseline >= 0.0));
}

#[test]
fn nothing_saved_without_productivity_initiatives() {
    let mut plan = reference();
    for step in &mut plan.planned.steps {
        step.initiatives.retain(|&id| id != Id::new(3).unwrap());
    }
    assert!(compute_saved_co2_dataset(&plan, None).unwrap().is_empty());
}

#[test]
fn nox_dataset_has_no_material_emissions() {
    let plan = reference();
    let dataset = compute_plan_daily_dataset(&plan, &Nox, false).unwrap();
    assert!(!dataset.is_empty());
    assert!(dataset.iter().all(|p| p.emissions.cement == 0.0 && p.emissions.steel == 0.0));
    assert!(dataset.iter().any(|p| p.emissions.baseline > 0.0));
}

#[test]
fn pollutant_kind_picks_the_strategy() {
    let plan = reference();
    let co2 = PollutantKind::Co2.strategy(plan.factors);
    let nox = PollutantKind::Nox.strategy(plan.factors);
    let a = compute_plan_total(&plan, co2.as_ref(), false).unwrap();
    let b = compute_plan_total(&plan, nox.as_ref(), false).unwrap();
    assert!(a.cement > 0.0);
    assert_eq!(b.cement, 0.0);
}
