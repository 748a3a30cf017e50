//! Two-parameter least-squares line fit
//!
//! Fits `offset + slope * i` to a window of samples at local offsets
//! `0..n`. The design matrix is always `[1, i]`, so instead of a general
//! solver we center the regressor: with `c_i = i - (n-1)/2` the columns
//! `[1, c]` are orthogonal and the QR factorisation of the design is
//! diagonal. Each parameter is then a single projection:
//!
//! ```text
//! slope  = Σ c_i (y_i - ȳ) / Σ c_i²
//! offset = ȳ - slope · (n-1)/2
//! ```
//!
//! This avoids the normal equations (`Σi²` grows as n³ and loses digits for
//! long segments) and makes the two-point case an exact interpolation.

use crate::{
    constants::FIXED_POINT_SCALE,
    errors::{FitError, FitResult},
};

/// Fitted line in fixed-point units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Value at local offset 0, 1/128 units
    pub offset: f64,
    /// Change per index, 1/128 units
    pub slope: f64,
}

/// Fit a line to `values` (real units) starting at domain index `start`.
///
/// Values are scaled to 1/128 units before fitting. `start` is only used
/// for error context.
pub fn fit_line(values: &[f64], start: usize) -> FitResult<LineFit> {
    let n = values.len();
    let non_finite = FitError::NonFiniteFit { start, points: n };

    if n == 0 || values.iter().any(|v| !v.is_finite()) {
        return Err(non_finite);
    }
    if n == 1 {
        return Ok(LineFit {
            offset: values[0] * FIXED_POINT_SCALE,
            slope: 0.0,
        });
    }

    let count = n as f64;
    let center = (count - 1.0) / 2.0;
    let mean = values.iter().map(|v| v * FIXED_POINT_SCALE).sum::<f64>() / count;

    // Σ c_i² has the closed form n(n²-1)/12
    let sum_cc = count * (count * count - 1.0) / 12.0;
    let sum_cy: f64 = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64 - center) * (v * FIXED_POINT_SCALE - mean))
        .sum();

    let slope = sum_cy / sum_cc;
    let offset = mean - slope * center;

    if !slope.is_finite() || !offset.is_finite() {
        return Err(non_finite);
    }

    Ok(LineFit { offset, slope })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        libm::fabs(a - b) <= tol
    }

    #[test]
    fn two_points_interpolate_exactly() {
        let fit = fit_line(&[30.0, 29.75], 0).unwrap();
        assert!(close(fit.offset, 3840.0, 1e-9));
        assert!(close(fit.slope, -32.0, 1e-9));
    }

    #[test]
    fn recovers_exact_line() {
        let values: alloc::vec::Vec<f64> = (0..1000).map(|i| 100.0 - i as f64 * 0.0625).collect();
        let fit = fit_line(&values, 0).unwrap();
        assert!(close(fit.offset, 12800.0, 1e-6));
        assert!(close(fit.slope, -8.0, 1e-9));
    }

    #[test]
    fn minimises_squared_residuals() {
        // y = i² on 0..3 -> best line 3i - 1 in real units
        let fit = fit_line(&[0.0, 1.0, 4.0, 9.0], 0).unwrap();
        assert!(close(fit.slope, 3.0 * FIXED_POINT_SCALE, 1e-9));
        assert!(close(fit.offset, -1.0 * FIXED_POINT_SCALE, 1e-9));
    }

    #[test]
    fn single_point_is_flat() {
        let fit = fit_line(&[12.5], 4).unwrap();
        assert_eq!(fit.offset, 1600.0);
        assert_eq!(fit.slope, 0.0);
    }

    #[test]
    fn non_finite_input_is_fatal() {
        assert_eq!(
            fit_line(&[1.0, f64::NAN, 3.0], 40),
            Err(FitError::NonFiniteFit { start: 40, points: 3 })
        );
        assert!(fit_line(&[], 0).is_err());
    }
}
