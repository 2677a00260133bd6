//! Reduction initiatives applied to a step's base emissions.

use serde::{Deserialize, Serialize};
use wp_core::{InitiativeId, Real, snap_to_zero};

use crate::error::CalcResult;
use crate::model::{Catalog, InitiativeKind, Stage, StepInput};
use crate::unit;

/// Emissions removed from a step by one initiative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitiativeReduction {
    pub initiative: InitiativeId,
    pub value: Real,
}

/// Apply each `(initiative, percent)` to `base`, preserving input order.
pub fn apply(base: Real, percentages: &[(InitiativeId, Real)]) -> Vec<InitiativeReduction> {
    percentages
        .iter()
        .map(|&(initiative, percent)| InitiativeReduction {
            initiative,
            value: percent * base / 100.0,
        })
        .collect()
}

pub fn total(reductions: &[InitiativeReduction]) -> Real {
    reductions.iter().map(|r| r.value).sum()
}

/// Percentages of the emission-cutting initiatives attached to `step`.
///
/// Productivity initiatives, deleted initiatives and initiatives without an
/// input for the step's phase/mode are skipped.
pub fn emission_percentages(
    step: &StepInput,
    catalog: &Catalog,
) -> CalcResult<Vec<(InitiativeId, Real)>> {
    attached(step, catalog, |kind| kind != InitiativeKind::Productivity)
}

/// Combined productivity percentage for `step`.
pub fn productivity_percentage(step: &StepInput, catalog: &Catalog) -> CalcResult<Real> {
    let percentages = attached(step, catalog, |kind| kind == InitiativeKind::Productivity)?;
    Ok(percentages.iter().map(|(_, p)| p).sum())
}

/// Improved duration of a planned step: the upstream value when the plan
/// fixes one, otherwise the total duration shortened by the step's
/// productivity initiatives.
pub fn improved_step_duration(step: &StepInput, catalog: &Catalog) -> CalcResult<Real> {
    if let Some(d) = step.improved_duration {
        return Ok(d);
    }
    let total = step.total_duration(Stage::Planned);
    Ok(unit::improved_duration(
        total,
        productivity_percentage(step, catalog)?,
    ))
}

fn attached(
    step: &StepInput,
    catalog: &Catalog,
    keep: impl Fn(InitiativeKind) -> bool,
) -> CalcResult<Vec<(InitiativeId, Real)>> {
    let mut out = Vec::new();
    for &id in &step.initiatives {
        let initiative = catalog.initiative(id)?;
        if initiative.deleted || !keep(initiative.kind) {
            continue;
        }
        if let Some(percent) = initiative.percentage_for(step.phase, step.mode) {
            out.push((id, percent));
        }
    }
    Ok(out)
}

/// Id-keyed sum of two reduction lists. Initiatives keep the order in
/// which they were first seen.
pub fn merge_add(
    first: &[InitiativeReduction],
    second: &[InitiativeReduction],
) -> Vec<InitiativeReduction> {
    let mut out = first.to_vec();
    for r in second {
        match out.iter_mut().find(|o| o.initiative == r.initiative) {
            Some(existing) => existing.value += r.value,
            None => out.push(*r),
        }
    }
    out
}

/// Id-keyed difference `first - second`, with floating noise collapsed to
/// zero.
pub fn merge_sub(
    first: &[InitiativeReduction],
    second: &[InitiativeReduction],
) -> Vec<InitiativeReduction> {
    let mut out = first.to_vec();
    for r in second {
        match out.iter_mut().find(|o| o.initiative == r.initiative) {
            Some(existing) => existing.value -= r.value,
            None => out.push(InitiativeReduction {
                initiative: r.initiative,
                value: -r.value,
            }),
        }
    }
    for r in &mut out {
        r.value = snap_to_zero(r.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FuelProperties, Initiative, InitiativeInput, Season};
    use chrono::NaiveDate;
    use wp_core::Id;

    fn id(raw: u32) -> Id {
        Id::new(raw).unwrap()
    }

    fn initiative(raw: u32, kind: InitiativeKind, value: Real) -> Initiative {
        Initiative {
            id: id(raw),
            name: format!("initiative {raw}"),
            kind,
            deployment_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            deleted: false,
            inputs: vec![InitiativeInput {
                phase: id(1),
                mode: id(1),
                value,
            }],
        }
    }

    fn catalog(initiatives: Vec<Initiative>) -> Catalog {
        Catalog {
            rig_fuel: FuelProperties {
                density: 0.85,
                nox_per_fuel: 50.0,
                co2_per_fuel: None,
            },
            baseline: vec![],
            boilers: None,
            external_energy_supply: None,
            vessel_types: vec![],
            helicopter_types: vec![],
            material_types: vec![],
            initiatives,
        }
    }

    fn step(initiatives: Vec<Id>) -> StepInput {
        StepInput {
            id: id(1),
            order: 0,
            phase: id(1),
            mode: id(1),
            season: Season::Summer,
            duration: 10.0,
            waiting_on_weather: 0.0,
            improved_duration: None,
            external_energy_supply_enabled: false,
            materials: vec![],
            initiatives,
        }
    }

    #[test]
    fn apply_keeps_order_and_scales_base() {
        let applied = apply(766.5, &[(id(1), 21.0), (id(2), 21.0)]);
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].initiative, id(1));
        assert!((applied[0].value - 160.965).abs() < 1e-9);
        assert!((total(&applied) - 321.93).abs() < 1e-9);
    }

    #[test]
    fn productivity_is_not_an_emission_reduction() {
        let catalog = catalog(vec![
            initiative(1, InitiativeKind::PowerSystems, 10.0),
            initiative(2, InitiativeKind::Productivity, 20.0),
            initiative(3, InitiativeKind::Baseloads, 5.0),
        ]);
        let step = step(vec![id(1), id(2), id(3)]);
        let emission = emission_percentages(&step, &catalog).unwrap();
        assert_eq!(emission, vec![(id(1), 10.0), (id(3), 5.0)]);
        assert_eq!(productivity_percentage(&step, &catalog).unwrap(), 20.0);
        assert!((improved_step_duration(&step, &catalog).unwrap() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn deleted_and_unmatched_initiatives_are_skipped() {
        let mut deleted = initiative(1, InitiativeKind::PowerSystems, 10.0);
        deleted.deleted = true;
        let mut other_mode = initiative(2, InitiativeKind::PowerSystems, 10.0);
        other_mode.inputs[0].mode = id(9);
        let catalog = catalog(vec![deleted, other_mode]);
        let step = step(vec![id(1), id(2)]);
        assert!(emission_percentages(&step, &catalog).unwrap().is_empty());
    }

    #[test]
    fn fixed_improved_duration_wins() {
        let catalog = catalog(vec![initiative(2, InitiativeKind::Productivity, 20.0)]);
        let mut step = step(vec![id(2)]);
        step.improved_duration = Some(9.5);
        assert_eq!(improved_step_duration(&step, &catalog).unwrap(), 9.5);
    }

    #[test]
    fn merges_are_keyed_by_initiative() {
        let a = apply(100.0, &[(id(1), 10.0), (id(2), 5.0)]);
        let b = apply(100.0, &[(id(2), 5.0), (id(3), 1.0)]);
        let sum = merge_add(&a, &b);
        assert_eq!(
            sum.iter().map(|r| r.initiative).collect::<Vec<_>>(),
            vec![id(1), id(2), id(3)]
        );
        assert!((sum[1].value - 10.0).abs() < 1e-12);

        let diff = merge_sub(&sum, &b);
        assert!((diff[0].value - 10.0).abs() < 1e-12);
        assert!((diff[1].value - 5.0).abs() < 1e-12);
        assert_eq!(diff[2].value, 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reductions_are_additive(
                base in 0.0_f64..10_000.0,
                percents in proptest::collection::vec(0.0_f64..30.0, 0..6),
            ) {
                let pairs: Vec<_> = percents
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (Id::new(i as u32 + 1).unwrap(), *p))
                    .collect();
                let sum_percent: Real = percents.iter().sum();
                let expected = base * sum_percent / 100.0;
                let got = total(&apply(base, &pairs));
                prop_assert!((got - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }
}
