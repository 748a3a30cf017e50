//! Fit configuration
//!
//! The error bound is the only parameter most callers touch. The search
//! schedule is exposed for tuning and tests; the defaults come from
//! [`crate::constants::search`].

use crate::{
    constants::{
        FIVE_FOLD_ERROR_RATIO, MAX_SLOPE_SHIFT, MIN_ERROR_BOUND, TWO_FOLD_ERROR_RATIO,
    },
    errors::{FitError, FitResult},
};

/// Table generation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitConfig {
    /// Maximum absolute interpolation error, in real units
    pub max_error: f64,
    /// Error ratio below which a segment length is multiplied by 5
    pub five_fold_ratio: f64,
    /// Error ratio below which a segment length is doubled
    pub two_fold_ratio: f64,
    /// Exclusive upper limit for the slope shift
    pub max_shift: u8,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            // 0.1 °C is below the tolerance of a 1% thermistor
            max_error: 0.1,
            five_fold_ratio: FIVE_FOLD_ERROR_RATIO,
            two_fold_ratio: TWO_FOLD_ERROR_RATIO,
            max_shift: MAX_SLOPE_SHIFT,
        }
    }
}

impl FitConfig {
    /// Set the error bound
    pub fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = max_error;
        self
    }

    /// Set the multiplicative growth thresholds
    pub fn with_growth_ratios(mut self, five_fold: f64, two_fold: f64) -> Self {
        self.five_fold_ratio = five_fold;
        self.two_fold_ratio = two_fold;
        self
    }

    /// Set the exclusive slope shift limit
    pub fn with_max_shift(mut self, max_shift: u8) -> Self {
        self.max_shift = max_shift;
        self
    }

    /// Check the configuration can produce a table
    pub fn validate(&self) -> FitResult<()> {
        if !self.max_error.is_finite() || self.max_error <= MIN_ERROR_BOUND {
            return Err(FitError::BoundTooSmall {
                bound: self.max_error,
                min: MIN_ERROR_BOUND,
            });
        }
        if !(0.0..=1.0).contains(&self.five_fold_ratio) || !(0.0..=1.0).contains(&self.two_fold_ratio) {
            return Err(FitError::InvalidConfig {
                reason: "growth ratios must lie in [0, 1]",
            });
        }
        if self.five_fold_ratio > self.two_fold_ratio {
            return Err(FitError::InvalidConfig {
                reason: "five-fold ratio must not exceed two-fold ratio",
            });
        }
        if self.max_shift == 0 || self.max_shift > MAX_SLOPE_SHIFT {
            return Err(FitError::InvalidConfig {
                reason: "max shift must lie in [1, 30]",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(FitConfig::default().validate().is_ok());
    }

    #[test]
    fn bound_must_exceed_half_resolution() {
        let err = FitConfig::default().with_max_error(1.0 / 256.0).validate();
        assert!(matches!(err, Err(FitError::BoundTooSmall { .. })));
        assert!(FitConfig::default().with_max_error(0.005).validate().is_ok());
        assert!(FitConfig::default().with_max_error(f64::NAN).validate().is_err());
    }

    #[test]
    fn rejects_inverted_growth_ratios() {
        let config = FitConfig::default().with_growth_ratios(0.6, 0.3);
        assert!(matches!(config.validate(), Err(FitError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_shift_limit_outside_range() {
        assert!(FitConfig::default().with_max_shift(0).validate().is_err());
        assert!(FitConfig::default().with_max_shift(31).validate().is_err());
        assert!(FitConfig::default().with_max_shift(16).validate().is_ok());
    }
}
