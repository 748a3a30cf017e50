//! Reference Curve Storage
//!
//! The reference curve is the ground truth the table approximates: one real
//! value per domain index, computed once by a sensor model (or any closure)
//! and never modified. The fitter only reads slices of it.
//!
//! Validation happens over the table's domain, not the whole curve. A 12-bit
//! thermistor curve is infinite at code 0 (zero resistance), but that code
//! is never inside a sensible table range.

use alloc::vec::Vec;

use crate::{
    constants::{FIXED_VALUE_MAX, FIXED_VALUE_MIN, MAX_DOMAIN_SIZE},
    errors::{FitError, FitResult},
};

/// Sampled reference values indexed by domain index (ADC code)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceCurve {
    values: Vec<f64>,
}

impl ReferenceCurve {
    /// Sample `f` at every index in `0..len`
    pub fn from_fn<F>(len: usize, f: F) -> Self
    where
        F: FnMut(usize) -> f64,
    {
        Self {
            values: (0..len).map(f).collect(),
        }
    }

    /// Wrap already computed values
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the curve has no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All samples
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sample at `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Samples in `[start, start + len)`
    pub(crate) fn window(&self, start: usize, len: usize) -> &[f64] {
        &self.values[start..start + len]
    }

    /// Check `[start, end]` is an ordered index range inside the curve.
    pub fn check_indices(&self, start: usize, end: usize) -> FitResult<()> {
        let len = self.values.len();
        if start > end || end >= len || len > MAX_DOMAIN_SIZE {
            return Err(FitError::InvalidDomain { start, end, len });
        }
        Ok(())
    }

    /// Check `[start, end]` is a usable table domain.
    ///
    /// Every sample in range must be finite and representable in 1/128 units.
    pub fn validate_domain(&self, start: usize, end: usize) -> FitResult<()> {
        self.check_indices(start, end)?;

        for (offset, &value) in self.values[start..=end].iter().enumerate() {
            let index = start + offset;
            if !value.is_finite() {
                return Err(FitError::NonFiniteReference { index });
            }
            if !(FIXED_VALUE_MIN..=FIXED_VALUE_MAX).contains(&value) {
                return Err(FitError::ReferenceOutOfRange {
                    index,
                    value,
                    min: FIXED_VALUE_MIN,
                    max: FIXED_VALUE_MAX,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_closure_per_index() {
        let curve = ReferenceCurve::from_fn(4, |i| i as f64 * 2.0);
        assert_eq!(curve.values(), &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(curve.get(3), Some(6.0));
        assert_eq!(curve.get(4), None);
        assert_eq!(curve.window(1, 2), &[2.0, 4.0]);
    }

    #[test]
    fn rejects_reversed_or_overlong_domain() {
        let curve = ReferenceCurve::from_fn(10, |_| 1.0);
        assert!(matches!(
            curve.validate_domain(5, 4),
            Err(FitError::InvalidDomain { start: 5, end: 4, len: 10 })
        ));
        assert!(curve.validate_domain(0, 10).is_err());
        assert!(curve.check_indices(9, 9).is_ok());
        assert!(curve.check_indices(0, 10).is_err());
        assert!(curve.validate_domain(0, 9).is_ok());
        assert!(curve.validate_domain(3, 3).is_ok());
    }

    #[test]
    fn rejects_non_finite_inside_domain_only() {
        let curve = ReferenceCurve::from_values(alloc::vec![f64::INFINITY, 10.0, 9.0, f64::NAN]);
        assert!(curve.validate_domain(1, 2).is_ok());
        assert_eq!(
            curve.validate_domain(0, 2),
            Err(FitError::NonFiniteReference { index: 0 })
        );
        assert_eq!(
            curve.validate_domain(1, 3),
            Err(FitError::NonFiniteReference { index: 3 })
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        let curve = ReferenceCurve::from_values(alloc::vec![300.0, 100.0, -256.0, -257.0]);
        assert!(matches!(
            curve.validate_domain(0, 1),
            Err(FitError::ReferenceOutOfRange { index: 0, .. })
        ));
        assert!(curve.validate_domain(1, 2).is_ok());
        assert!(matches!(
            curve.validate_domain(2, 3),
            Err(FitError::ReferenceOutOfRange { index: 3, .. })
        ));
    }
}
