//! Well-plan document schema.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use wp_emissions::{
    Catalog, EmissionFactors, HelicopterUse, SampleSeries, SensorSample, StepInput, VesselUse,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellPlan {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub planned_start_date: NaiveDate,
    /// Set once the well moves from planning to execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub factors: EmissionFactors,
    pub catalog: Catalog,
    #[serde(default)]
    pub planned: Schedule,
    #[serde(default)]
    pub complete: Schedule,
    /// Rig CO2 samples of the executed well.
    #[serde(default)]
    pub telemetry: Vec<SensorSample>,
}

/// Steps and logistics of either the plan or its executed counterpart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    #[serde(default)]
    pub steps: Vec<StepInput>,
    #[serde(default)]
    pub vessel_uses: Vec<VesselUse>,
    #[serde(default)]
    pub helicopter_uses: Vec<HelicopterUse>,
}

impl Schedule {
    /// Steps sorted by ascending `order`.
    pub fn ordered_steps(&self) -> Vec<&StepInput> {
        let mut steps: Vec<&StepInput> = self.steps.iter().collect();
        steps.sort_by_key(|step| step.order);
        steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl WellPlan {
    pub fn planned_start(&self) -> DateTime<Utc> {
        midnight(self.planned_start_date)
    }

    pub fn actual_start(&self) -> Option<DateTime<Utc>> {
        self.actual_start_date.map(midnight)
    }

    pub fn telemetry_series(&self) -> SampleSeries {
        SampleSeries::new(self.telemetry.clone())
    }
}
