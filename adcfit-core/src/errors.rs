//! Error Types for Table Generation
//!
//! ## Design Philosophy
//!
//! Every error here is fatal to the run that produced it. A table that silently
//! misses the caller's accuracy contract is worse than no table, so nothing in
//! the core retries, relaxes a bound or returns a partial result.
//!
//! Like the rest of the crate the error type is built for `no_std`:
//!
//! 1. **Small and `Copy`**: only inline numeric context, no heap strings
//! 2. **Actionable**: each variant names the index, value or limit involved so
//!    the caller can fix its input or configuration
//!
//! ## Error Categories
//!
//! ### Input errors (detected before fitting starts)
//! - `NonFiniteReference`: NaN or infinity in the reference curve
//! - `ReferenceOutOfRange`: value outside the ±256 fixed-point range
//! - `BoundTooSmall`: error bound at or below half the fixed-point resolution
//! - `InvalidDomain`: start/end indices outside the curve or reversed
//! - `InvalidConfig`: search or sensor parameters that cannot work
//!
//! ### Algorithmic errors (detected during fitting)
//! - `NonFiniteFit`: the least-squares solve produced NaN or infinity
//! - `SlopeQuantization`: no shift below the limit represents the slope
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use adcfit_core::{build_table, FitConfig, FitError, ReferenceCurve};
//!
//! let curve = ReferenceCurve::from_fn(1024, |code| 100.0 - code as f64 * 0.1);
//! match build_table(&curve, 0, 1023, &FitConfig::default()) {
//!     Ok(table) => {
//!         // emit_firmware_table(&table);
//!         # let _ = table;
//!     }
//!     Err(FitError::ReferenceOutOfRange { index, .. }) => {
//!         // Narrow the temperature range so the table starts after `index`
//!         # let _ = index;
//!     }
//!     Err(FitError::SlopeQuantization { .. }) => {
//!         // Curve too steep for one segment: split the domain
//!     }
//!     Err(_) => {
//!         // Configuration problem - report and stop
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for table generation
pub type FitResult<T> = Result<T, FitError>;

/// Fatal table generation errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FitError {
    /// Reference value is NaN or infinite
    #[error("Reference value at index {index} is not a valid number")]
    NonFiniteReference {
        /// Domain index of the offending sample
        index: usize,
    },

    /// Reference value cannot be stored as a 1/128 fixed-point `i16`
    #[error("Reference value {value} at index {index} outside range [{min}, {max}]")]
    ReferenceOutOfRange {
        /// Domain index of the offending sample
        index: usize,
        /// The reference value
        value: f64,
        /// Lowest representable value
        min: f64,
        /// Highest representable value
        max: f64,
    },

    /// Error bound too tight for the fixed-point resolution
    #[error("Error bound {bound} must exceed {min}")]
    BoundTooSmall {
        /// Requested bound
        bound: f64,
        /// Exclusive lower limit
        min: f64,
    },

    /// Start/end indices do not describe a range inside the curve
    #[error("Domain [{start}, {end}] invalid for a curve of {len} samples")]
    InvalidDomain {
        /// Requested start index
        start: usize,
        /// Requested end index
        end: usize,
        /// Number of samples in the curve
        len: usize,
    },

    /// Configuration parameter that cannot produce a table
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong
        reason: &'static str,
    },

    /// Least-squares solve produced NaN or infinite parameters
    #[error("Line fit over {points} points at index {start} is not finite")]
    NonFiniteFit {
        /// First domain index of the window
        start: usize,
        /// Window length
        points: usize,
    },

    /// No shift below the limit quantizes the slope within tolerance
    #[error("Slope {slope} over {points} points needs a shift of {max_shift} or more")]
    SlopeQuantization {
        /// Slope in fixed-point units per index
        slope: f64,
        /// Segment length
        points: usize,
        /// Exclusive shift limit that was exhausted
        max_shift: u8,
    },
}

impl FitError {
    /// True for errors raised before any fitting happened
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteReference { .. }
                | Self::ReferenceOutOfRange { .. }
                | Self::BoundTooSmall { .. }
                | Self::InvalidDomain { .. }
                | Self::InvalidConfig { .. }
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FitError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NonFiniteReference { index } =>
                defmt::write!(fmt, "Reference {} not finite", index),
            Self::ReferenceOutOfRange { index, value, min, max } =>
                defmt::write!(fmt, "Reference {}={} outside [{}, {}]", index, value, min, max),
            Self::BoundTooSmall { bound, min } =>
                defmt::write!(fmt, "Bound {} must exceed {}", bound, min),
            Self::InvalidDomain { start, end, len } =>
                defmt::write!(fmt, "Domain [{}, {}] invalid for {} samples", start, end, len),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::NonFiniteFit { start, points } =>
                defmt::write!(fmt, "Fit at {} over {} points not finite", start, points),
            Self::SlopeQuantization { slope, points, max_shift } =>
                defmt::write!(fmt, "Slope {} over {} points needs shift >= {}", slope, points, max_shift),
        }
    }
}
