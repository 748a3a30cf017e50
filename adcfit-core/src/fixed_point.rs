//! Fixed-Point Arithmetic Shared by Host and Device
//!
//! ## Rounding Rule
//!
//! Segment evaluation computes `round(i * multiplier / 2^shift)`. Ties round
//! half away from zero, never to even:
//!
//! ```text
//!  x >= 0:  ( x + 2^(s-1)) >> s
//!  x <  0: -((-x + 2^(s-1)) >> s)
//! ```
//!
//! The error evaluator and the lookup in [`crate::lookup`] both go through
//! [`round_shift`], so a table that passes evaluation on the host reproduces
//! bit-for-bit on the device.
//!
//! ## Value Conversion
//!
//! Real values map to `i16` in units of 1/128. [`to_fixed`] rounds with the
//! same half-away-from-zero rule as `libm::round`.

use crate::constants::{FIXED_POINT_SCALE, FIXED_VALUE_MAX, FIXED_VALUE_MIN};

/// Arithmetic right shift with round-half-away-from-zero.
///
/// `shift == 0` returns `value` unchanged.
#[inline]
pub fn round_shift(value: i64, shift: u8) -> i64 {
    if shift == 0 {
        return value;
    }
    let half = 1i64 << (shift - 1);
    if value >= 0 {
        (value + half) >> shift
    } else {
        -((-value + half) >> shift)
    }
}

/// Convert a real value to 1/128 units, `None` if it does not fit in `i16`.
pub fn to_fixed(value: f64) -> Option<i16> {
    if !value.is_finite() {
        return None;
    }
    let scaled = libm::round(value * FIXED_POINT_SCALE);
    if scaled < i16::MIN as f64 || scaled > i16::MAX as f64 {
        None
    } else {
        Some(scaled as i16)
    }
}

/// Convert a real value to 1/128 units, saturating at the `i16` limits.
pub fn to_fixed_saturating(value: f64) -> i16 {
    let scaled = libm::round(value * FIXED_POINT_SCALE);
    // NaN casts to 0
    scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Convert 1/128 units back to a real value.
#[inline]
pub fn from_fixed(value: i32) -> f64 {
    value as f64 / FIXED_POINT_SCALE
}

/// True if `value` lies inside the representable real range.
pub fn in_fixed_range(value: f64) -> bool {
    (FIXED_VALUE_MIN..=FIXED_VALUE_MAX).contains(&value)
}

/// Q9.7 conversions for firmware built on the `fixed` crate.
#[cfg(feature = "fixed")]
pub mod q9_7 {
    use fixed::types::I9F7;

    /// Reinterpret 1/128 units as `I9F7`.
    pub fn from_bits(value: i16) -> I9F7 {
        I9F7::from_bits(value)
    }

    /// Raw 1/128 units of an `I9F7`.
    pub fn to_bits(value: I9F7) -> i16 {
        value.to_bits()
    }
}
