//! Pollutant strategies.
//!
//! The step aggregator only knows how much fuel each source burns and how
//! much energy comes from shore. A [`Pollutant`] turns those quantities
//! into emitted mass.

use wp_core::Real;

use crate::factors::EmissionFactors;
use crate::model::{ExternalEnergySupply, FuelProperties, HelicopterType, MaterialType};
use crate::unit;

pub trait Pollutant: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Emissions of `fuel` m3 of diesel burnt by the rig, a vessel or a boiler.
    fn diesel(&self, fuel: Real, properties: &FuelProperties) -> Real;

    /// Emissions of `fuel` m3 of jet fuel.
    fn jet_fuel(&self, fuel: Real, helicopter: &HelicopterType) -> Real;

    /// Emissions per MWh of shore power.
    fn grid_factor(&self, supply: &ExternalEnergySupply) -> Real;

    /// Whether embodied material emissions count toward this pollutant.
    fn materials_contribute(&self) -> bool;

    fn material(&self, quantity: Real, material: &MaterialType) -> Real {
        if self.materials_contribute() {
            unit::material(quantity, material.co2)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Co2 {
    pub factors: EmissionFactors,
}

impl Co2 {
    pub fn new(factors: EmissionFactors) -> Self {
        Self { factors }
    }
}

impl Pollutant for Co2 {
    fn name(&self) -> &'static str {
        "co2"
    }

    fn diesel(&self, fuel: Real, properties: &FuelProperties) -> Real {
        let factor = properties
            .co2_per_fuel
            .unwrap_or(self.factors.diesel_co2_per_fuel);
        unit::co2(fuel, factor)
    }

    fn jet_fuel(&self, fuel: Real, helicopter: &HelicopterType) -> Real {
        let factor = helicopter
            .fuel
            .co2_per_fuel
            .unwrap_or_else(|| self.factors.jet_fuel_co2_per_fuel());
        unit::co2(fuel, factor)
    }

    fn grid_factor(&self, supply: &ExternalEnergySupply) -> Real {
        supply.co2
    }

    fn materials_contribute(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Nox;

impl Pollutant for Nox {
    fn name(&self) -> &'static str {
        "nox"
    }

    fn diesel(&self, fuel: Real, properties: &FuelProperties) -> Real {
        unit::nox(fuel, properties.density, properties.nox_per_fuel)
    }

    fn jet_fuel(&self, fuel: Real, helicopter: &HelicopterType) -> Real {
        unit::nox(fuel, helicopter.fuel.density, helicopter.fuel.nox_per_fuel)
    }

    fn grid_factor(&self, supply: &ExternalEnergySupply) -> Real {
        supply.nox
    }

    fn materials_contribute(&self) -> bool {
        false
    }
}
