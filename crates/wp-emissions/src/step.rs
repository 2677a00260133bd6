//! Per-step emission aggregation.

use tracing::debug;
use wp_core::{Real, ensure_non_negative};

use crate::error::CalcResult;
use crate::factors::EmissionFactors;
use crate::model::{Catalog, HelicopterUse, MaterialCategory, Stage, StepInput, VesselUse};
use crate::pollutant::{Co2, Nox, Pollutant};
use crate::reduction::{self, InitiativeReduction};
use crate::result::EmissionResult;
use crate::unit;

/// Plan-level records shared by every step of one calculation.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub catalog: &'a Catalog,
    pub stage: Stage,
    pub vessel_uses: &'a [VesselUse],
    pub helicopter_uses: &'a [HelicopterUse],
}

/// Durations (days) a step is evaluated over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDurations {
    /// Duration attributed to this step (total, improved or measured).
    pub duration: Real,
    /// Sum of the step durations of the whole plan.
    pub total_duration: Real,
    /// Sum of the step durations sharing this step's season.
    pub total_season_duration: Real,
}

/// Emissions from everything but the rig itself.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Sources {
    pub boilers: Real,
    pub vessels: Real,
    pub helicopters: Real,
    pub cement: Real,
    pub steel: Real,
    pub external_energy_supply: Real,
    pub external_energy_supply_reduction: Real,
}

pub fn compute_step<P: Pollutant + ?Sized>(
    pollutant: &P,
    ctx: &StepContext<'_>,
    step: &StepInput,
    durations: StepDurations,
) -> CalcResult<EmissionResult> {
    ensure_non_negative(durations.duration, "step duration")?;
    let input = ctx
        .catalog
        .baseline_input(step.phase, step.mode, step.season)?;
    let base = pollutant.diesel(
        unit::fuel(input.value, durations.duration),
        &ctx.catalog.rig_fuel,
    );
    let sources = sources(pollutant, ctx, step, durations)?;
    let percentages = reduction::emission_percentages(step, ctx.catalog)?;
    let reductions = reduction::apply(base, &percentages);
    let rig = base - sources.external_energy_supply_reduction - reduction::total(&reductions);

    let result = assemble(base, rig, sources, reductions);
    debug!(
        step = %step.id,
        pollutant = pollutant.name(),
        duration = durations.duration,
        baseline = result.baseline,
        target = result.target,
        "computed step emissions"
    );
    Ok(result)
}

pub fn compute_step_co2(
    ctx: &StepContext<'_>,
    factors: EmissionFactors,
    step: &StepInput,
    durations: StepDurations,
) -> CalcResult<EmissionResult> {
    compute_step(&Co2::new(factors), ctx, step, durations)
}

pub fn compute_step_nox(
    ctx: &StepContext<'_>,
    step: &StepInput,
    durations: StepDurations,
) -> CalcResult<EmissionResult> {
    compute_step(&Nox, ctx, step, durations)
}

pub(crate) fn sources<P: Pollutant + ?Sized>(
    pollutant: &P,
    ctx: &StepContext<'_>,
    step: &StepInput,
    durations: StepDurations,
) -> CalcResult<Sources> {
    let catalog = ctx.catalog;
    let d = durations.duration;
    let mut out = Sources::default();

    if let Some(boilers) = &catalog.boilers {
        let fuel = unit::fuel(boilers.fuel_consumption(step.season), d);
        out.boilers = pollutant.diesel(fuel, &boilers.fuel);
    }

    let mut vessels = 0.0;
    for vessel_use in ctx.vessel_uses.iter().filter(|u| u.season == step.season) {
        let vessel_type = catalog.vessel_type(vessel_use.vessel_type)?;
        vessels += pollutant.diesel(vessel_use.fuel(ctx.stage, vessel_type), &vessel_type.fuel);
    }
    out.vessels = unit::step_vessels_fuel(vessels, d, durations.total_season_duration);

    let mut helicopters = 0.0;
    for helicopter_use in ctx.helicopter_uses {
        let helicopter_type = catalog.helicopter_type(helicopter_use.helicopter_type)?;
        helicopters += pollutant.jet_fuel(helicopter_use.fuel(helicopter_type), helicopter_type);
    }
    out.helicopters = unit::step_helicopters_fuel(helicopters, d, durations.total_duration);

    for material in &step.materials {
        let material_type = catalog.material_type(material.material_type)?;
        let mass = pollutant.material(material.quantity, material_type);
        match material_type.category {
            MaterialCategory::Cement => out.cement += mass,
            MaterialCategory::Steel => out.steel += mass,
            MaterialCategory::Bulk | MaterialCategory::Chemicals => {}
        }
    }

    if step.external_energy_supply_enabled {
        let supply = catalog.external_energy_supply()?;
        out.external_energy_supply = unit::external_energy_supply(
            supply.capacity,
            pollutant.grid_factor(supply),
            unit::days_to_hours(d),
        );
        if let Some(efficiency) = supply.generator_efficiency {
            let fuel = unit::external_energy_supply_fuel_reduction(supply.capacity, efficiency, d);
            out.external_energy_supply_reduction = pollutant.diesel(fuel, &catalog.rig_fuel);
        }
    }

    Ok(out)
}

pub(crate) fn assemble(
    base: Real,
    rig: Real,
    sources: Sources,
    reductions: Vec<InitiativeReduction>,
) -> EmissionResult {
    let baseline = base
        + sources.helicopters
        + sources.vessels
        + sources.external_energy_supply
        + sources.steel
        + sources.cement
        + sources.boilers;
    let target = rig
        + sources.cement
        + sources.steel
        + sources.external_energy_supply
        + sources.vessels
        + sources.helicopters
        + sources.boilers;

    EmissionResult {
        base,
        baseline,
        target,
        rig,
        boilers: sources.boilers,
        vessels: sources.vessels,
        helicopters: sources.helicopters,
        cement: sources.cement,
        steel: sources.steel,
        external_energy_supply: sources.external_energy_supply,
        external_energy_supply_reduction: sources.external_energy_supply_reduction,
        reductions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaselineInput, BoilerProfile, ExternalEnergySupply, FuelProperties, Season};
    use wp_core::Id;

    fn id(raw: u32) -> Id {
        Id::new(raw).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog {
            rig_fuel: FuelProperties {
                density: 0.85,
                nox_per_fuel: 60.0,
                co2_per_fuel: None,
            },
            baseline: vec![BaselineInput {
                phase: id(1),
                mode: id(1),
                season: Season::Winter,
                value: 20.0,
            }],
            boilers: None,
            external_energy_supply: Some(ExternalEnergySupply {
                capacity: 10.0,
                co2: 0.0002,
                nox: 0.000003,
                generator_efficiency: None,
            }),
            vessel_types: vec![],
            helicopter_types: vec![],
            material_types: vec![],
            initiatives: vec![],
        }
    }

    fn step() -> StepInput {
        StepInput {
            id: id(1),
            order: 0,
            phase: id(1),
            mode: id(1),
            season: Season::Winter,
            duration: 2.0,
            waiting_on_weather: 0.0,
            improved_duration: None,
            external_energy_supply_enabled: false,
            materials: vec![],
            initiatives: vec![],
        }
    }

    fn durations() -> StepDurations {
        StepDurations {
            duration: 2.0,
            total_duration: 2.0,
            total_season_duration: 2.0,
        }
    }

    fn ctx(catalog: &Catalog) -> StepContext<'_> {
        StepContext {
            catalog,
            stage: Stage::Planned,
            vessel_uses: &[],
            helicopter_uses: &[],
        }
    }

    #[test]
    fn rig_only_step() {
        let catalog = catalog();
        let r = compute_step_co2(&ctx(&catalog), EmissionFactors::default(), &step(), durations())
            .unwrap();
        assert!((r.base - 126.8).abs() < 1e-9);
        assert_eq!(r.base, r.rig);
        assert_eq!(r.baseline, r.target);
    }

    #[test]
    fn nox_uses_rig_fuel_properties() {
        let catalog = catalog();
        let r = compute_step_nox(&ctx(&catalog), &step(), durations()).unwrap();
        // 40 m3 * 0.85 t/m3 * 60 kg/t
        assert!((r.base - 0.00204).abs() < 1e-12);
    }

    #[test]
    fn generator_efficiency_displaces_rig_fuel() {
        let mut catalog = catalog();
        if let Some(supply) = catalog.external_energy_supply.as_mut() {
            supply.generator_efficiency = Some(0.5);
        }
        let mut step = step();
        step.external_energy_supply_enabled = true;
        let r = compute_step_co2(&ctx(&catalog), EmissionFactors::default(), &step, durations())
            .unwrap();
        // 10 MW * 0.5 * 2 days = 10 m3 of rig fuel
        assert!((r.external_energy_supply_reduction - 31.7).abs() < 1e-9);
        assert!((r.rig - (126.8 - 31.7)).abs() < 1e-9);
        assert!((r.external_energy_supply - 0.096).abs() < 1e-12);
        assert!(r.target < r.baseline);
    }

    #[test]
    fn boilers_follow_step_season() {
        let mut catalog = catalog();
        catalog.boilers = Some(BoilerProfile {
            fuel_consumption_summer: 30.0,
            fuel_consumption_winter: 27.5,
            fuel: catalog.rig_fuel,
        });
        let r = compute_step_co2(&ctx(&catalog), EmissionFactors::default(), &step(), durations())
            .unwrap();
        assert!((r.boilers - 27.5 * 2.0 * 3.17).abs() < 1e-9);
        assert!((r.baseline - r.base - r.boilers).abs() < 1e-9);
    }

    #[test]
    fn enabled_supply_without_asset_is_an_error() {
        let mut catalog = catalog();
        catalog.external_energy_supply = None;
        let mut step = step();
        step.external_energy_supply_enabled = true;
        assert!(
            compute_step_co2(&ctx(&catalog), EmissionFactors::default(), &step, durations())
                .is_err()
        );
    }
}
