//! Segment and statistics types

use crate::fixed_point::{from_fixed, round_shift};

/// One linear piece of an interpolation table.
///
/// For a local offset `i = code - start_index` the segment evaluates to
/// `start_value + round(i * slope_multiplier / 2^slope_shift)` in 1/128 units.
/// The field widths are the packed firmware record: `u16, i16, i32, u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// First domain index (ADC code) covered by the segment
    pub start_index: u16,
    /// Value at `start_index`, 1/128 units
    pub start_value: i16,
    /// Slope numerator
    pub slope_multiplier: i32,
    /// Slope denominator exponent (`2^slope_shift`)
    pub slope_shift: u8,
}

impl Segment {
    /// Constant segment holding `start_value`
    pub const fn flat(start_index: u16, start_value: i16) -> Self {
        Self {
            start_index,
            start_value,
            slope_multiplier: 0,
            slope_shift: 0,
        }
    }

    /// Fixed-point value at local offset `offset`.
    ///
    /// Not clamped to `i16`: the device saturates after evaluation.
    #[inline]
    pub fn value_at(&self, offset: u32) -> i32 {
        let delta = round_shift(offset as i64 * self.slope_multiplier as i64, self.slope_shift);
        (self.start_value as i64 + delta) as i32
    }

    /// Real value at local offset `offset`
    pub fn real_value_at(&self, offset: u32) -> f64 {
        from_fixed(self.value_at(offset))
    }

    /// Slope in 1/128 units per index
    pub fn slope(&self) -> f64 {
        self.slope_multiplier as f64 / (1u64 << self.slope_shift) as f64
    }

    /// Start value as a Q9.7 number
    #[cfg(feature = "fixed")]
    pub fn start_value_q9_7(&self) -> fixed::types::I9F7 {
        crate::fixed_point::q9_7::from_bits(self.start_value)
    }
}

/// Accuracy of one accepted segment against the reference curve
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentStats {
    /// Number of domain indices covered
    pub points: usize,
    /// Mean absolute error, real units
    pub mean_error: f64,
    /// Maximum absolute error, real units
    pub max_error: f64,
}
