//! Read-only domain records consumed by the calculators.
//!
//! Everything here is loaded once per calculation and never mutated by
//! the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wp_core::{
    HelicopterTypeId, InitiativeId, MaterialTypeId, ModeId, PhaseId, Real, StepId, VesselTypeId,
};

use crate::error::{CalcResult, EmissionError};
use crate::unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Summer,
}

/// Whether a record belongs to the plan or to its executed counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Planned,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeKind {
    PowerSystems,
    Baseloads,
    /// Shortens step durations instead of cutting emissions.
    Productivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Steel,
    Cement,
    Bulk,
    Chemicals,
}

/// Physical properties of a burnt fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProperties {
    /// t/m3
    pub density: Real,
    /// kg NOx per tonne of fuel
    pub nox_per_fuel: Real,
    /// t CO2 per m3 of fuel; the plan-wide factor applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_per_fuel: Option<Real>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoilerProfile {
    /// m3/day
    pub fuel_consumption_summer: Real,
    /// m3/day
    pub fuel_consumption_winter: Real,
    pub fuel: FuelProperties,
}

impl BoilerProfile {
    pub fn fuel_consumption(&self, season: Season) -> Real {
        match season {
            Season::Summer => self.fuel_consumption_summer,
            Season::Winter => self.fuel_consumption_winter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselType {
    pub id: VesselTypeId,
    #[serde(default)]
    pub name: String,
    /// m3/day
    pub fuel_consumption_summer: Real,
    /// m3/day
    pub fuel_consumption_winter: Real,
    pub fuel: FuelProperties,
}

impl VesselType {
    pub fn fuel_consumption(&self, season: Season) -> Real {
        match season {
            Season::Summer => self.fuel_consumption_summer,
            Season::Winter => self.fuel_consumption_winter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelicopterType {
    pub id: HelicopterTypeId,
    #[serde(default)]
    pub name: String,
    /// l/h
    pub fuel_consumption: Real,
    pub fuel: FuelProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialType {
    pub id: MaterialTypeId,
    pub category: MaterialCategory,
    /// Tonnes of CO2 per unit of material.
    pub co2: Real,
}

/// Shore power connection of the rig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalEnergySupply {
    /// MW
    pub capacity: Real,
    /// t CO2 / MWh
    pub co2: Real,
    /// t NOx / MWh
    pub nox: Real,
    /// m3 of rig fuel displaced per MW of capacity per day. When present,
    /// enabling the supply also removes the fuel the rig generators would
    /// have burnt.
    #[serde(default)]
    pub generator_efficiency: Option<Real>,
}

/// Rig fuel consumption (m3/day) for one phase/mode/season combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineInput {
    pub phase: PhaseId,
    pub mode: ModeId,
    pub season: Season,
    pub value: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeInput {
    pub phase: PhaseId,
    pub mode: ModeId,
    /// Percent, 0..=100.
    pub value: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: InitiativeId,
    pub name: String,
    pub kind: InitiativeKind,
    pub deployment_date: NaiveDate,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub inputs: Vec<InitiativeInput>,
}

impl Initiative {
    /// Percentage declared for a phase/mode pair, if any.
    pub fn percentage_for(&self, phase: PhaseId, mode: ModeId) -> Option<Real> {
        self.inputs
            .iter()
            .find(|input| input.phase == phase && input.mode == mode)
            .map(|input| input.value)
    }
}

fn full_exposure() -> Real {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUse {
    pub material_type: MaterialTypeId,
    pub quantity: Real,
    #[serde(default)]
    pub quota: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselUse {
    pub vessel_type: VesselTypeId,
    /// days
    pub duration: Real,
    /// percent of `duration`
    #[serde(default)]
    pub waiting_on_weather: Real,
    /// percent of the use spent on this well
    #[serde(default = "full_exposure")]
    pub exposure: Real,
    pub season: Season,
}

impl VesselUse {
    /// Days the vessel is engaged. Executed uses already contain any
    /// weather downtime.
    pub fn total_days(&self, stage: Stage) -> Real {
        match stage {
            Stage::Planned => self.duration * (1.0 + self.waiting_on_weather / 100.0),
            Stage::Complete => self.duration,
        }
    }

    /// m3 of fuel burnt over the whole use.
    pub fn fuel(&self, stage: Stage, vessel_type: &VesselType) -> Real {
        unit::vessel_fuel(
            self.total_days(stage),
            0.0,
            vessel_type.fuel_consumption(self.season),
            self.exposure,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelicopterUse {
    pub helicopter_type: HelicopterTypeId,
    /// Number of round trips.
    pub trips: Real,
    /// Minutes per round trip.
    pub trip_duration: Real,
    #[serde(default = "full_exposure")]
    pub exposure: Real,
}

impl HelicopterUse {
    /// m3 of jet fuel burnt over the whole use.
    pub fn fuel(&self, helicopter_type: &HelicopterType) -> Real {
        unit::helicopter_fuel(
            self.trip_duration,
            self.trips,
            helicopter_type.fuel_consumption,
            self.exposure,
        )
    }
}

/// One ordered step of a plan (or of its executed counterpart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInput {
    pub id: StepId,
    pub order: u32,
    pub phase: PhaseId,
    pub mode: ModeId,
    pub season: Season,
    /// days
    pub duration: Real,
    /// percent of `duration`
    #[serde(default)]
    pub waiting_on_weather: Real,
    /// Duration after productivity initiatives, when fixed upstream.
    #[serde(default)]
    pub improved_duration: Option<Real>,
    #[serde(default)]
    pub external_energy_supply_enabled: bool,
    #[serde(default)]
    pub materials: Vec<MaterialUse>,
    #[serde(default)]
    pub initiatives: Vec<InitiativeId>,
}

impl StepInput {
    pub fn total_duration(&self, stage: Stage) -> Real {
        match stage {
            Stage::Planned => self.duration + self.duration * self.waiting_on_weather / 100.0,
            Stage::Complete => self.duration,
        }
    }
}

/// Coefficient registries and initiatives of one well plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub rig_fuel: FuelProperties,
    #[serde(default)]
    pub baseline: Vec<BaselineInput>,
    #[serde(default)]
    pub boilers: Option<BoilerProfile>,
    #[serde(default)]
    pub external_energy_supply: Option<ExternalEnergySupply>,
    #[serde(default)]
    pub vessel_types: Vec<VesselType>,
    #[serde(default)]
    pub helicopter_types: Vec<HelicopterType>,
    #[serde(default)]
    pub material_types: Vec<MaterialType>,
    #[serde(default)]
    pub initiatives: Vec<Initiative>,
}

impl Catalog {
    pub fn baseline_input(
        &self,
        phase: PhaseId,
        mode: ModeId,
        season: Season,
    ) -> CalcResult<&BaselineInput> {
        self.baseline
            .iter()
            .find(|b| b.phase == phase && b.mode == mode && b.season == season)
            .ok_or(EmissionError::MissingBaselineInput {
                phase,
                mode,
                season,
            })
    }

    pub fn vessel_type(&self, id: VesselTypeId) -> CalcResult<&VesselType> {
        self.vessel_types
            .iter()
            .find(|v| v.id == id)
            .ok_or(EmissionError::MissingCoefficient {
                what: "vessel type",
                id,
            })
    }

    pub fn helicopter_type(&self, id: HelicopterTypeId) -> CalcResult<&HelicopterType> {
        self.helicopter_types
            .iter()
            .find(|h| h.id == id)
            .ok_or(EmissionError::MissingCoefficient {
                what: "helicopter type",
                id,
            })
    }

    pub fn material_type(&self, id: MaterialTypeId) -> CalcResult<&MaterialType> {
        self.material_types
            .iter()
            .find(|m| m.id == id)
            .ok_or(EmissionError::MissingCoefficient {
                what: "material type",
                id,
            })
    }

    pub fn initiative(&self, id: InitiativeId) -> CalcResult<&Initiative> {
        self.initiatives
            .iter()
            .find(|i| i.id == id)
            .ok_or(EmissionError::MissingCoefficient {
                what: "initiative",
                id,
            })
    }

    pub fn external_energy_supply(&self) -> CalcResult<&ExternalEnergySupply> {
        self.external_energy_supply
            .as_ref()
            .ok_or(EmissionError::InvalidArg {
                what: "step enables an external energy supply the asset does not have",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wp_core::Id;

    fn id(raw: u32) -> Id {
        Id::new(raw).unwrap()
    }

    #[test]
    fn planned_step_includes_waiting_on_weather() {
        let step = StepInput {
            id: id(1),
            order: 0,
            phase: id(1),
            mode: id(1),
            season: Season::Summer,
            duration: 5.0,
            waiting_on_weather: 100.0,
            improved_duration: None,
            external_energy_supply_enabled: false,
            materials: vec![],
            initiatives: vec![],
        };
        assert_eq!(step.total_duration(Stage::Planned), 10.0);
        assert_eq!(step.total_duration(Stage::Complete), 5.0);
    }

    #[test]
    fn vessel_use_days_depend_on_stage() {
        let use_ = VesselUse {
            vessel_type: id(1),
            duration: 10.0,
            waiting_on_weather: 20.0,
            exposure: 100.0,
            season: Season::Winter,
        };
        assert!((use_.total_days(Stage::Planned) - 12.0).abs() < 1e-12);
        assert_eq!(use_.total_days(Stage::Complete), 10.0);
    }

    #[test]
    fn missing_baseline_input_is_reported() {
        let catalog = Catalog {
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
            initiatives: vec![],
        };
        let err = catalog
            .baseline_input(id(1), id(2), Season::Winter)
            .unwrap_err();
        assert!(matches!(err, EmissionError::MissingBaselineInput { .. }));
    }
}
