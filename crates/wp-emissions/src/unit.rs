//! Stateless fuel and emission formulas.
//!
//! Units: durations in days unless noted, fuel in m3, CO2 in tonnes,
//! NOx in tonnes.

use wp_core::{HOURS_PER_DAY, Real, prorate};

/// Fuel burnt at a constant daily rate.
#[inline]
pub fn fuel(rate_per_day: Real, duration: Real) -> Real {
    rate_per_day * duration
}

#[inline]
pub fn co2(fuel: Real, co2_per_fuel: Real) -> Real {
    fuel * co2_per_fuel
}

/// `nox_per_fuel` is kg per tonne of fuel; the result is tonnes.
#[inline]
pub fn nox(fuel: Real, density: Real, nox_per_fuel: Real) -> Real {
    fuel * density * nox_per_fuel / 1_000_000.0
}

pub fn vessel_fuel(
    duration: Real,
    waiting_on_weather: Real,
    fuel_consumption: Real,
    exposure: Real,
) -> Real {
    duration * (1.0 + waiting_on_weather / 100.0) * (exposure / 100.0) * fuel_consumption
}

/// Jet fuel (m3) for `roundtrip_count` trips of `roundtrip_minutes` each at
/// `fuel_consumption` l/h.
pub fn helicopter_fuel(
    roundtrip_minutes: Real,
    roundtrip_count: Real,
    fuel_consumption: Real,
    exposure: Real,
) -> Real {
    (roundtrip_minutes / 60.0) * roundtrip_count * (fuel_consumption / 1000.0) * (exposure / 100.0)
}

/// Emissions of grid power drawn at `capacity` MW for `hours`.
#[inline]
pub fn external_energy_supply(capacity: Real, factor: Real, hours: Real) -> Real {
    capacity * factor * hours
}

/// Rig fuel (m3) not burnt while the external supply runs for `duration` days.
#[inline]
pub fn external_energy_supply_fuel_reduction(
    capacity: Real,
    generator_efficiency: Real,
    duration: Real,
) -> Real {
    capacity * generator_efficiency * duration
}

#[inline]
pub fn material(quantity: Real, co2_per_unit: Real) -> Real {
    quantity * co2_per_unit
}

#[inline]
pub fn days_to_hours(duration: Real) -> Real {
    duration * HOURS_PER_DAY
}

/// Duration left once productivity initiatives totalling `productivity`
/// percent are applied.
#[inline]
pub fn improved_duration(duration: Real, productivity: Real) -> Real {
    duration - productivity * duration / 100.0
}

/// Share of the plan-wide vessel fuel burnt during one step, prorated
/// over the days of the same season.
pub fn step_vessels_fuel(total_fuel: Real, step_duration: Real, season_duration: Real) -> Real {
    prorate(total_fuel, step_duration, season_duration)
}

/// Share of the plan-wide helicopter fuel burnt during one step.
pub fn step_helicopters_fuel(total_fuel: Real, step_duration: Real, plan_duration: Real) -> Real {
    prorate(total_fuel, step_duration, plan_duration)
}
