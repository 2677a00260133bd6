use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use wp_app::*;
use wp_core::{Id, Real, Tolerances, nearly_equal};
use wp_plan::WellPlan;
use wp_timeseries::Window;

fn reference() -> WellPlan {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/reference_well.yaml");
    load_plan(&path).unwrap()
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

fn actual_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

#[test]
fn measured_days_of_first_step_add_up_to_reference_figures() {
    let plan = reference();
    let dataset = compute_measured_daily_dataset(&plan).unwrap();
    let first: Vec<_> = dataset
        .iter()
        .filter(|p| p.step == Id::new(11).unwrap())
        .collect();
    assert_eq!(first.len(), 10);

    let rig: Real = first.iter().map(|p| p.emissions.rig).sum();
    let baseline: Real = first.iter().map(|p| p.emissions.baseline).sum();
    let target: Real = first.iter().map(|p| p.emissions.target).sum();
    assert!(close(rig, 444.57));
    assert!(close(baseline, 1620.366923616734));
    assert!(close(target, 1298.4369236167342));

    // first day carries the two samples taken on June 1st
    assert!(close(first[0].emissions.rig, 222.57));
    assert!(close(first[1].emissions.rig, 0.0));
}

#[test]
fn measured_summary_matches_daily_dataset() {
    let plan = reference();
    let summary = compute_measured_summary(&plan).unwrap();
    let dataset = compute_measured_daily_dataset(&plan).unwrap();
    let baseline: Real = dataset.iter().map(|p| p.emissions.baseline).sum();
    assert!(close(summary.total_baseline, baseline));
    assert!(close(summary.total_duration, 37.05));
}

#[test]
fn measured_hours_pick_up_single_samples() {
    let plan = reference();
    let window = Window::new(actual_start(), actual_start() + TimeDelta::hours(23));
    let dataset = compute_measured_windowed_dataset(&plan, window).unwrap();
    assert_eq!(dataset.len(), 24);
    assert!(close(dataset[0].emissions.rig, 111.57));
    assert!(close(dataset[12].emissions.rig, 111.0));
    assert!(close(dataset[1].emissions.rig, 0.0));
}

#[test]
fn measured_datasets_need_an_actual_start() {
    let mut plan = reference();
    plan.actual_start_date = None;
    assert!(matches!(
        compute_measured_daily_dataset(&plan),
        Err(AppError::MissingActualStartDate(_))
    ));
    assert!(matches!(
        compute_measurement_dataset(&plan, None),
        Err(AppError::MissingActualStartDate(_))
    ));
}

#[test]
fn daily_measurements_average_each_day() {
    let plan = reference();
    let points = compute_measurement_dataset(&plan, None).unwrap();
    // 37.05 days touch 38 calendar days
    assert_eq!(points.len(), 38);
    assert_eq!(points[0].at, actual_start());
    assert!(close(points[0].value.unwrap(), 111.285));
    assert_eq!(points[1].value, None);
    assert!(close(points[3].value.unwrap(), 111.0));
}

#[test]
fn whole_day_plans_stop_on_their_last_day() {
    let mut plan = reference();
    plan.complete.steps[1].duration = 27.0;
    let points = compute_measurement_dataset(&plan, None).unwrap();
    assert_eq!(points.len(), 37);
}

#[test]
fn hourly_measurements_default_to_zero() {
    let plan = reference();
    let window = Window::new(actual_start(), actual_start() + TimeDelta::hours(12));
    let points = compute_measurement_dataset(&plan, Some(window)).unwrap();
    assert_eq!(points.len(), 13);
    assert_eq!(points[0].value, Some(111.57));
    assert_eq!(points[5].value, Some(0.0));
    assert_eq!(points[12].value, Some(111.0));
}

#[test]
fn validate_plan_file_reports_the_overview() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/reference_well.yaml");
    let overview = validate_plan_file(&path).unwrap();
    assert_eq!(overview.planned_steps, 2);
    assert_eq!(overview.complete_steps, 2);
    assert_eq!(overview.telemetry_samples, 6);
    assert!(overview.has_actual_start);
}

#[test]
fn missing_plan_file_is_a_read_error() {
    let err = load_plan(std::path::Path::new("/nonexistent/plan.yaml")).unwrap_err();
    assert!(matches!(err, AppError::PlanFileRead { .. }));
}

#[test]
fn boundary_samples_are_counted_once() {
    let mut plan = reference();
    plan.complete.steps[0].duration = 10.0548;
    let step_boundary = wp_timeseries::offset_by_days(actual_start(), 10.0548).unwrap();
    plan.telemetry.push(wp_emissions::SensorSample {
        at: step_boundary,
        value: 100.0,
    });
    plan.telemetry.push(wp_emissions::SensorSample {
        at: actual_start() + TimeDelta::days(20),
        value: 100.0,
    });
    let recorded: Real = plan.telemetry.iter().map(|s| s.value).sum();

    let daily = compute_measured_daily_dataset(&plan).unwrap();
    let rig: Real = daily.iter().map(|p| p.emissions.rig).sum();
    assert!(close(rig, recorded));

    let midnight = actual_start() + TimeDelta::days(20);
    let at_midnight: Vec<_> = daily.iter().filter(|p| p.at == midnight).collect();
    assert_eq!(at_midnight.len(), 1);
    assert!(close(at_midnight[0].emissions.rig, 100.0));

    let window = Window::new(
        actual_start() + TimeDelta::days(10),
        actual_start() + TimeDelta::days(11),
    );
    let hourly = compute_measured_windowed_dataset(&plan, window).unwrap();
    let rig: Real = hourly.iter().map(|p| p.emissions.rig).sum();
    assert!(close(rig, 100.0));
}
