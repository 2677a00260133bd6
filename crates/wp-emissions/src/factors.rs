//! Conversion factors shared by all CO2 calculations.

use serde::{Deserialize, Serialize};
use wp_core::Real;

/// Tonnes of CO2 per m3 of marine diesel.
pub const DIESEL_CO2_PER_FUEL: Real = 3.17;
/// Tonnes of CO2 per tonne of jet fuel.
pub const HELICOPTER_CO2_FACTOR: Real = 3.16;
/// Tonnes of jet fuel per m3.
pub const JET_FUEL_TO_KG: Real = 0.8;

/// Factors used to turn burnt fuel into CO2.
///
/// Plans may override them; the defaults are the reference values above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    pub diesel_co2_per_fuel: Real,
    pub helicopter_co2_factor: Real,
    pub jet_fuel_to_kg: Real,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            diesel_co2_per_fuel: DIESEL_CO2_PER_FUEL,
            helicopter_co2_factor: HELICOPTER_CO2_FACTOR,
            jet_fuel_to_kg: JET_FUEL_TO_KG,
        }
    }
}

impl EmissionFactors {
    /// CO2 per m3 of jet fuel.
    pub fn jet_fuel_co2_per_fuel(&self) -> Real {
        self.jet_fuel_to_kg * self.helicopter_co2_factor
    }
}
