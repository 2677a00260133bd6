//! Document version migration.

use crate::PlanError;
use crate::schema::WellPlan;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut plan: WellPlan) -> Result<WellPlan, PlanError> {
    while plan.version < LATEST_VERSION {
        plan = migrate_one_version(plan)?;
    }
    Ok(plan)
}

fn migrate_one_version(plan: WellPlan) -> Result<WellPlan, PlanError> {
    match plan.version {
        0 => migrate_v0_to_v1(plan),
        v => Err(PlanError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

// v0 documents predate the version field; the layout is unchanged.
fn migrate_v0_to_v1(mut plan: WellPlan) -> Result<WellPlan, PlanError> {
    plan.version = 1;
    Ok(plan)
}
