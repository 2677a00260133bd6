use crate::CoreError;

/// Tonnes, days and percentages are all carried as `f64`.
pub type Real = f64;

/// Magnitude below which a difference of two emission figures is treated
/// as floating point noise.
pub const ROUNDING_ERROR: Real = 1e-10;

/// Absolute/relative pair used when comparing emission figures.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Collapse values within `ROUNDING_ERROR` of zero to exactly zero.
#[inline]
pub fn snap_to_zero(v: Real) -> Real {
    if v.abs() < ROUNDING_ERROR { 0.0 } else { v }
}

/// Share of `value` attributable to `part` out of `whole`.
///
/// An empty `whole` has nothing to distribute and yields zero.
#[inline]
pub fn prorate(value: Real, part: Real, whole: Real) -> Real {
    if whole > 0.0 { value * part / whole } else { 0.0 }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        Err(CoreError::Negative { what, value: v })
    } else {
        Ok(v)
    }
}
