//! Rational slope quantization
//!
//! The device cannot divide, so a slope is stored as `multiplier / 2^shift`.
//! The search walks `shift` upward from 0 and keeps the first candidate whose
//! accumulated error over the whole segment is at most half a unit:
//!
//! ```text
//! multiplier = round(slope · 2^shift)
//! accept if | n·multiplier / 2^shift - n·slope | <= 0.5
//! ```
//!
//! Small shifts are preferred because they keep the multiplier small. A
//! candidate whose `n · multiplier` leaves `i32` would overflow on the device;
//! every larger shift only grows the multiplier, so the search stops there.

use crate::{
    constants::SLOPE_TOLERANCE_UNITS,
    errors::{FitError, FitResult},
};

/// Slope as `multiplier / 2^shift`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalSlope {
    /// Numerator
    pub multiplier: i32,
    /// Denominator exponent
    pub shift: u8,
}

impl RationalSlope {
    /// Value of the fraction
    pub fn value(&self) -> f64 {
        self.multiplier as f64 / (1u64 << self.shift) as f64
    }
}

/// Quantize `slope` (1/128 units per index) for a segment of `points` indices.
///
/// Tries every shift in `[0, max_shift)`.
pub fn quantize_slope(slope: f64, points: usize, max_shift: u8) -> FitResult<RationalSlope> {
    let exhausted = FitError::SlopeQuantization {
        slope,
        points,
        max_shift,
    };
    if !slope.is_finite() {
        return Err(exhausted);
    }

    let count = points.max(1) as f64;
    let target = slope * count;

    for shift in 0..max_shift {
        let scale = (1u64 << shift) as f64;
        let multiplier = libm::round(slope * scale);

        if libm::fabs(multiplier * count) > i32::MAX as f64 {
            log_trace!(
                "slope {} over {} points overflows at shift {}",
                slope, points, shift
            );
            break;
        }

        if libm::fabs(multiplier * count / scale - target) <= SLOPE_TOLERANCE_UNITS {
            return Ok(RationalSlope {
                multiplier: multiplier as i32,
                shift,
            });
        }
    }

    Err(exhausted)
}
