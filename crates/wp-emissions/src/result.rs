use serde::{Deserialize, Serialize};
use wp_core::{Real, snap_to_zero};

use crate::reduction::{self, InitiativeReduction};

/// Emissions of one step (or a sum of steps), broken down by source.
///
/// `rig` is the rig figure after reductions; `baseline` and `target` are
/// the totals without and with them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub base: Real,
    pub baseline: Real,
    pub target: Real,
    pub rig: Real,
    pub boilers: Real,
    pub vessels: Real,
    pub helicopters: Real,
    pub cement: Real,
    pub steel: Real,
    pub external_energy_supply: Real,
    /// Rig emissions avoided by running on shore power.
    pub external_energy_supply_reduction: Real,
    pub reductions: Vec<InitiativeReduction>,
}

impl EmissionResult {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn total_reduction(&self) -> Real {
        reduction::total(&self.reductions)
    }

    /// Every quantity multiplied by `factor`, e.g. to prorate a step over
    /// part of its duration.
    pub fn scaled(&self, factor: Real) -> Self {
        Self {
            base: self.base * factor,
            baseline: self.baseline * factor,
            target: self.target * factor,
            rig: self.rig * factor,
            boilers: self.boilers * factor,
            vessels: self.vessels * factor,
            helicopters: self.helicopters * factor,
            cement: self.cement * factor,
            steel: self.steel * factor,
            external_energy_supply: self.external_energy_supply * factor,
            external_energy_supply_reduction: self.external_energy_supply_reduction * factor,
            reductions: self
                .reductions
                .iter()
                .map(|r| InitiativeReduction {
                    initiative: r.initiative,
                    value: r.value * factor,
                })
                .collect(),
        }
    }

    /// Field-wise sum; reductions are merged by initiative.
    pub fn added(&self, other: &Self) -> Self {
        Self {
            base: self.base + other.base,
            baseline: self.baseline + other.baseline,
            target: self.target + other.target,
            rig: self.rig + other.rig,
            boilers: self.boilers + other.boilers,
            vessels: self.vessels + other.vessels,
            helicopters: self.helicopters + other.helicopters,
            cement: self.cement + other.cement,
            steel: self.steel + other.steel,
            external_energy_supply: self.external_energy_supply + other.external_energy_supply,
            external_energy_supply_reduction: self.external_energy_supply_reduction
                + other.external_energy_supply_reduction,
            reductions: reduction::merge_add(&self.reductions, &other.reductions),
        }
    }

    /// Field-wise `self - other` with floating noise collapsed to zero.
    pub fn subtracted(&self, other: &Self) -> Self {
        let sub = |a: Real, b: Real| snap_to_zero(a - b);
        Self {
            base: sub(self.base, other.base),
            baseline: sub(self.baseline, other.baseline),
            target: sub(self.target, other.target),
            rig: sub(self.rig, other.rig),
            boilers: sub(self.boilers, other.boilers),
            vessels: sub(self.vessels, other.vessels),
            helicopters: sub(self.helicopters, other.helicopters),
            cement: sub(self.cement, other.cement),
            steel: sub(self.steel, other.steel),
            external_energy_supply: sub(
                self.external_energy_supply,
                other.external_energy_supply,
            ),
            external_energy_supply_reduction: sub(
                self.external_energy_supply_reduction,
                other.external_energy_supply_reduction,
            ),
            reductions: reduction::merge_sub(&self.reductions, &other.reductions),
        }
    }
}

impl std::iter::Sum for EmissionResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, r| acc.added(&r))
    }
}
