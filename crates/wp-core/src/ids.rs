use core::fmt;
use core::num::NonZeroU32;

use crate::{CoreError, CoreResult};

/// Identifier of a well-plan record (phase, mode, step, initiative, ...).
///
/// Record ids are 1-based, so zero is rejected and `Option<Id>` stays the
/// size of a `u32`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Id(NonZeroU32);

impl Id {
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    pub fn from_raw(raw: u32) -> CoreResult<Self> {
        Self::new(raw).ok_or(CoreError::InvalidArg {
            what: "record id must be non-zero",
        })
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.get())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type PhaseId = Id;
pub type ModeId = Id;
pub type StepId = Id;
pub type InitiativeId = Id;
pub type VesselTypeId = Id;
pub type HelicopterTypeId = Id;
pub type MaterialTypeId = Id;
