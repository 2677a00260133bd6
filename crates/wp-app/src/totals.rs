//! Plan-wide durations and step offsets.
//!
//! Every step needs the plan and season totals, and its position on the
//! calendar is the sum of the durations before it. Both are computed once
//! here so the per-step work can run independently.

use serde::{Deserialize, Serialize};
use wp_core::Real;
use wp_emissions::reduction::improved_step_duration;
use wp_emissions::{MeasuredTotals, Season, Stage, StepDurations, StepInput};
use wp_plan::{Schedule, WellPlan};

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonDurations {
    pub winter: Real,
    pub summer: Real,
}

impl SeasonDurations {
    pub fn add(&mut self, season: Season, duration: Real) {
        match season {
            Season::Winter => self.winter += duration,
            Season::Summer => self.summer += duration,
        }
    }

    pub fn get(&self, season: Season) -> Real {
        match season {
            Season::Winter => self.winter,
            Season::Summer => self.summer,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduledStep<'a> {
    pub step: &'a StepInput,
    /// Days attributed to the step in this schedule.
    pub duration: Real,
    /// Days between the schedule start and the step start.
    pub offset: Real,
}

#[derive(Debug, Clone)]
pub struct PlanSchedule<'a> {
    pub stage: Stage,
    pub steps: Vec<ScheduledStep<'a>>,
    pub total_duration: Real,
    pub seasons: SeasonDurations,
}

impl<'a> PlanSchedule<'a> {
    fn build(
        stage: Stage,
        schedule: &'a Schedule,
        mut duration_of: impl FnMut(&StepInput) -> AppResult<Real>,
    ) -> AppResult<Self> {
        let mut steps = Vec::with_capacity(schedule.steps.len());
        let mut seasons = SeasonDurations::default();
        let mut offset = 0.0;
        for step in schedule.ordered_steps() {
            let duration = duration_of(step)?;
            seasons.add(step.season, duration);
            steps.push(ScheduledStep {
                step,
                duration,
                offset,
            });
            offset += duration;
        }
        Ok(Self {
            stage,
            steps,
            total_duration: offset,
            seasons,
        })
    }

    /// Planned steps with their total or improved durations.
    pub fn planned(plan: &'a WellPlan, improved: bool) -> AppResult<Self> {
        Self::build(Stage::Planned, &plan.planned, |step| {
            if improved {
                Ok(improved_step_duration(step, &plan.catalog)?)
            } else {
                Ok(step.total_duration(Stage::Planned))
            }
        })
    }

    /// Executed steps with their recorded durations.
    pub fn complete(plan: &'a WellPlan) -> AppResult<Self> {
        Self::build(Stage::Complete, &plan.complete, |step| {
            Ok(step.total_duration(Stage::Complete))
        })
    }

    pub fn durations(&self, scheduled: &ScheduledStep<'_>) -> StepDurations {
        StepDurations {
            duration: scheduled.duration,
            total_duration: self.total_duration,
            total_season_duration: self.seasons.get(scheduled.step.season),
        }
    }

    pub fn measured_totals(&self, scheduled: &ScheduledStep<'_>) -> MeasuredTotals {
        MeasuredTotals {
            total_duration: self.total_duration,
            total_season_duration: self.seasons.get(scheduled.step.season),
        }
    }

    pub fn find(&self, id: wp_core::StepId) -> Option<&ScheduledStep<'a>> {
        self.steps.iter().find(|s| s.step.id == id)
    }
}
