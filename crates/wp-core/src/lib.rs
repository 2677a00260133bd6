//! wp-core: shared foundation for the well-plan emissions engine.
//!
//! Contains:
//! - units (uom time quantities + day/hour conversions)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact record identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
