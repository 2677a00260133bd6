//! Plan validation logic.

use std::collections::HashSet;

use wp_core::{Id, Real};
use wp_emissions::{Catalog, FuelProperties, InitiativeKind, StepInput};

use crate::schema::{Schedule, WellPlan};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_plan(plan: &WellPlan) -> Result<(), ValidationError> {
    if plan.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: plan.version,
        });
    }

    validate_catalog(&plan.catalog)?;
    validate_schedule(&plan.planned, &plan.catalog, "planned")?;
    validate_schedule(&plan.complete, &plan.catalog, "complete")?;

    for step in &plan.planned.steps {
        for &initiative_id in &step.initiatives {
            let Some(initiative) = plan.catalog.initiatives.iter().find(|i| i.id == initiative_id)
            else {
                continue;
            };
            if initiative.deployment_date > plan.planned_start_date {
                return Err(ValidationError::InvalidValue {
                    field: format!("initiatives[{}].deployment_date", initiative.id),
                    value: initiative.deployment_date.to_string(),
                    reason: "initiative must be deployed before the planned start date".to_string(),
                });
            }
        }
    }

    for sample in &plan.telemetry {
        check_finite("telemetry.value", sample.value)?;
    }

    Ok(())
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ValidationError> {
    check_fuel("rig_fuel", &catalog.rig_fuel)?;

    let mut keys = HashSet::new();
    for input in &catalog.baseline {
        check_non_negative("baseline.value", input.value)?;
        if !keys.insert((input.phase, input.mode, input.season)) {
            return Err(ValidationError::DuplicateId {
                id: format!("{}/{}/{:?}", input.phase, input.mode, input.season),
                context: "baseline inputs".to_string(),
            });
        }
    }

    if let Some(boilers) = &catalog.boilers {
        check_non_negative("boilers.fuel_consumption_summer", boilers.fuel_consumption_summer)?;
        check_non_negative("boilers.fuel_consumption_winter", boilers.fuel_consumption_winter)?;
        check_fuel("boilers.fuel", &boilers.fuel)?;
    }

    if let Some(supply) = &catalog.external_energy_supply {
        check_non_negative("external_energy_supply.capacity", supply.capacity)?;
        check_non_negative("external_energy_supply.co2", supply.co2)?;
        check_non_negative("external_energy_supply.nox", supply.nox)?;
        if let Some(efficiency) = supply.generator_efficiency {
            check_non_negative("external_energy_supply.generator_efficiency", efficiency)?;
        }
    }

    unique_ids(catalog.vessel_types.iter().map(|v| v.id), "vessel types")?;
    for vessel_type in &catalog.vessel_types {
        check_non_negative("vessel_types.fuel_consumption_summer", vessel_type.fuel_consumption_summer)?;
        check_non_negative("vessel_types.fuel_consumption_winter", vessel_type.fuel_consumption_winter)?;
        check_fuel("vessel_types.fuel", &vessel_type.fuel)?;
    }

    unique_ids(catalog.helicopter_types.iter().map(|h| h.id), "helicopter types")?;
    for helicopter_type in &catalog.helicopter_types {
        check_non_negative("helicopter_types.fuel_consumption", helicopter_type.fuel_consumption)?;
        check_fuel("helicopter_types.fuel", &helicopter_type.fuel)?;
    }

    unique_ids(catalog.material_types.iter().map(|m| m.id), "material types")?;
    for material_type in &catalog.material_types {
        check_non_negative("material_types.co2", material_type.co2)?;
    }

    unique_ids(catalog.initiatives.iter().map(|i| i.id), "initiatives")?;
    for initiative in &catalog.initiatives {
        for input in &initiative.inputs {
            check_percent("initiatives.inputs.value", input.value)?;
        }
    }

    Ok(())
}

fn validate_schedule(
    schedule: &Schedule,
    catalog: &Catalog,
    context: &str,
) -> Result<(), ValidationError> {
    unique_ids(schedule.steps.iter().map(|s| s.id), &format!("{context} steps"))?;

    let mut orders = HashSet::new();
    for step in &schedule.steps {
        if !orders.insert(step.order) {
            return Err(ValidationError::DuplicateId {
                id: step.order.to_string(),
                context: format!("{context} step order"),
            });
        }
        validate_step(step, catalog, context)?;
    }

    for vessel_use in &schedule.vessel_uses {
        require(
            catalog.vessel_types.iter().any(|v| v.id == vessel_use.vessel_type),
            vessel_use.vessel_type,
            &format!("{context} vessel use"),
        )?;
        check_non_negative("vessel_uses.duration", vessel_use.duration)?;
        check_non_negative("vessel_uses.waiting_on_weather", vessel_use.waiting_on_weather)?;
        check_percent("vessel_uses.exposure", vessel_use.exposure)?;
    }

    for helicopter_use in &schedule.helicopter_uses {
        require(
            catalog
                .helicopter_types
                .iter()
                .any(|h| h.id == helicopter_use.helicopter_type),
            helicopter_use.helicopter_type,
            &format!("{context} helicopter use"),
        )?;
        check_non_negative("helicopter_uses.trips", helicopter_use.trips)?;
        check_non_negative("helicopter_uses.trip_duration", helicopter_use.trip_duration)?;
        check_percent("helicopter_uses.exposure", helicopter_use.exposure)?;
    }

    Ok(())
}

fn validate_step(step: &StepInput, catalog: &Catalog, context: &str) -> Result<(), ValidationError> {
    check_non_negative("steps.duration", step.duration)?;
    check_non_negative("steps.waiting_on_weather", step.waiting_on_weather)?;
    if let Some(improved) = step.improved_duration {
        check_non_negative("steps.improved_duration", improved)?;
    }

    if catalog
        .baseline_input(step.phase, step.mode, step.season)
        .is_err()
    {
        return Err(ValidationError::MissingReference {
            id: format!("{}/{}/{:?}", step.phase, step.mode, step.season),
            context: format!("{context} step {} baseline input", step.id),
        });
    }

    if step.external_energy_supply_enabled && catalog.external_energy_supply.is_none() {
        return Err(ValidationError::MissingReference {
            id: "external_energy_supply".to_string(),
            context: format!("{context} step {}", step.id),
        });
    }

    for material in &step.materials {
        require(
            catalog.material_types.iter().any(|m| m.id == material.material_type),
            material.material_type,
            &format!("{context} step {} materials", step.id),
        )?;
        check_non_negative("steps.materials.quantity", material.quantity)?;
    }

    let mut productivity = 0.0;
    for &initiative_id in &step.initiatives {
        let Some(initiative) = catalog.initiatives.iter().find(|i| i.id == initiative_id) else {
            return Err(ValidationError::MissingReference {
                id: initiative_id.to_string(),
                context: format!("{context} step {} initiatives", step.id),
            });
        };
        if initiative.kind == InitiativeKind::Productivity && !initiative.deleted {
            productivity += initiative.percentage_for(step.phase, step.mode).unwrap_or(0.0);
        }
    }
    if productivity > 100.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("steps[{}].initiatives", step.id),
            value: productivity.to_string(),
            reason: "productivity initiatives exceed 100%".to_string(),
        });
    }

    Ok(())
}

fn unique_ids(ids: impl Iterator<Item = Id>, context: &str) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.to_string(),
                context: context.to_string(),
            });
        }
    }
    Ok(())
}

fn require(found: bool, id: Id, context: &str) -> Result<(), ValidationError> {
    if found {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            id: id.to_string(),
            context: context.to_string(),
        })
    }
}

fn check_finite(field: &str, value: Real) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        })
    }
}

fn check_non_negative(field: &str, value: Real) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn check_fuel(prefix: &str, fuel: &FuelProperties) -> Result<(), ValidationError> {
    check_non_negative(&format!("{prefix}.density"), fuel.density)?;
    check_non_negative(&format!("{prefix}.nox_per_fuel"), fuel.nox_per_fuel)?;
    if let Some(co2) = fuel.co2_per_fuel {
        check_non_negative(&format!("{prefix}.co2_per_fuel"), co2)?;
    }
    Ok(())
}

fn check_percent(field: &str, value: Real) -> Result<(), ValidationError> {
    check_non_negative(field, value)?;
    if value > 100.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be a percentage between 0 and 100".to_string(),
        });
    }
    Ok(())
}
