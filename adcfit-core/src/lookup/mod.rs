//! Device-Side Segment Lookup
//!
//! ## Evaluation
//!
//! A table is a slice of [`Segment`]s sorted by `start_index` plus the last
//! covered code. Looking up an ADC code is a binary search followed by one
//! multiply and one rounded shift:
//!
//! ```text
//! k      = last segment with start_index <= code
//! offset = code - start_index[k]
//! value  = start_value[k] + round_shift(offset * multiplier[k], shift[k])
//! ```
//!
//! No floating point, no division, no allocation. The rounding goes through
//! [`crate::fixed_point::round_shift`], the same function the host-side evaluator uses, so a
//! value measured while fitting is exactly the value returned here.
//!
//! ## Out-of-Range Codes
//!
//! Codes below the first segment return the first start value, codes past
//! the end index return the value at the end index. A disconnected or
//! shorted sensor therefore reads as the coldest or hottest covered
//! temperature rather than an extrapolated one. [`SegmentTable::try_lookup`]
//! reports those codes as `None` for firmware that wants to flag the fault.
//!
//! ## Storage
//!
//! Tables can be embedded as `static` Rust arrays (see the `adcfit` CLI) or
//! shipped as bytes and decoded with [`codec::decode_table`] into a
//! fixed-capacity buffer.

use thiserror_no_std::Error;

use crate::{
    fit::Segment,
    fixed_point::from_fixed,
};

pub mod codec;

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors raised while checking or decoding a table
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// Table has no segments
    #[error("Table has no segments")]
    EmptyTable,

    /// Segment start indices are not strictly increasing, or the end index
    /// precedes the last segment
    #[error("Segment {index} is out of order")]
    Unsorted {
        /// Offending segment
        index: usize,
    },

    /// Shift too large for 32-bit device arithmetic
    #[error("Segment {index} has shift {shift}")]
    InvalidShift {
        /// Offending segment
        index: usize,
        /// Stored shift
        shift: u8,
    },

    /// Byte buffer shorter than the header announces
    #[error("Packed table truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// Bytes left over after the last record
    #[error("Packed table has {extra} trailing bytes")]
    TrailingData {
        /// Number of unused bytes
        extra: usize,
    },

    /// More segments than the decode buffer holds
    #[error("Table has {count} segments, capacity is {capacity}")]
    CapacityExceeded {
        /// Segments in the packed table
        count: usize,
        /// Buffer capacity
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for LookupError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::EmptyTable => defmt::write!(fmt, "Empty table"),
            Self::Unsorted { index } => defmt::write!(fmt, "Segment {} out of order", index),
            Self::InvalidShift { index, shift } =>
                defmt::write!(fmt, "Segment {} shift {}", index, shift),
            Self::Truncated { expected, actual } =>
                defmt::write!(fmt, "Truncated: {} of {} bytes", actual, expected),
            Self::TrailingData { extra } => defmt::write!(fmt, "{} trailing bytes", extra),
            Self::CapacityExceeded { count, capacity } =>
                defmt::write!(fmt, "{} segments exceed capacity {}", count, capacity),
        }
    }
}

/// Shifts at or above this overflow the rounding offset in 32-bit firmware
pub const MAX_DEVICE_SHIFT: u8 = 31;

/// Borrowed interpolation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentTable<'a> {
    segments: &'a [Segment],
    end_index: u16,
}

impl<'a> SegmentTable<'a> {
    /// Wrap a slice without checking it.
    ///
    /// For tables produced by the fitter or embedded at build time.
    pub const fn new(segments: &'a [Segment], end_index: u16) -> Self {
        Self { segments, end_index }
    }

    /// Wrap a slice after checking order and shifts.
    pub fn try_new(segments: &'a [Segment], end_index: u16) -> LookupResult<Self> {
        let last = segments.last().ok_or(LookupError::EmptyTable)?;

        for (index, segment) in segments.iter().enumerate() {
            if segment.slope_shift >= MAX_DEVICE_SHIFT {
                return Err(LookupError::InvalidShift { index, shift: segment.slope_shift });
            }
            if index > 0 && segment.start_index <= segments[index - 1].start_index {
                return Err(LookupError::Unsorted { index });
            }
        }
        if end_index < last.start_index {
            return Err(LookupError::Unsorted { index: segments.len() - 1 });
        }

        Ok(Self::new(segments, end_index))
    }

    /// Segments in order
    pub fn segments(&self) -> &'a [Segment] {
        self.segments
    }

    /// First covered code
    pub fn start_index(&self) -> u16 {
        self.segments.first().map_or(0, |s| s.start_index)
    }

    /// Last covered code
    pub fn end_index(&self) -> u16 {
        self.end_index
    }

    /// True if `code` lies inside the covered range
    pub fn contains(&self, code: u16) -> bool {
        !self.segments.is_empty() && code >= self.start_index() && code <= self.end_index
    }

    /// Index of the segment covering `code`, clamped to the table
    fn segment_for(&self, code: u16) -> usize {
        self.segments
            .partition_point(|s| s.start_index <= code)
            .saturating_sub(1)
    }

    /// Fixed-point value (1/128 units) for `code`.
    ///
    /// Flat outside the covered range; an empty table reads 0.
    pub fn lookup(&self, code: u16) -> i16 {
        if self.segments.is_empty() {
            return 0;
        }

        let code = code.max(self.start_index()).min(self.end_index);
        let segment = &self.segments[self.segment_for(code)];
        let value = segment.value_at(u32::from(code - segment.start_index));
        value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }

    /// Like [`lookup`](Self::lookup) but `None` outside the covered range
    pub fn try_lookup(&self, code: u16) -> Option<i16> {
        self.contains(code).then(|| self.lookup(code))
    }

    /// Value for `code` in real units
    pub fn lookup_real(&self, code: u16) -> f64 {
        from_fixed(i32::from(self.lookup(code)))
    }

    /// Value for `code` as a Q9.7 number
    #[cfg(feature = "fixed")]
    pub fn lookup_q9_7(&self, code: u16) -> fixed::types::I9F7 {
        crate::fixed_point::q9_7::from_bits(self.lookup(code))
    }
}
