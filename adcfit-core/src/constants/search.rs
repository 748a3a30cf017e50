//! Segment Search Parameters
//!
//! Controls how quickly the segment-length line search grows a candidate and
//! how finely it backs off near the error boundary.

/// Additive growth steps, largest first.
///
/// The search picks the largest step not exceeding its last successful
/// increment and moves to the next smaller one after each rejection. The
/// trailing 1 is what guarantees the search can always make progress.
pub const ADDITIVE_STEPS: [usize; 9] = [500, 200, 100, 50, 20, 10, 5, 2, 1];

/// Error ratio (max error / bound) below which the length is multiplied by 5.
pub const FIVE_FOLD_ERROR_RATIO: f64 = 0.1;

/// Error ratio (max error / bound) below which the length is doubled.
pub const TWO_FOLD_ERROR_RATIO: f64 = 0.5;

/// Exclusive upper limit for the slope shift.
///
/// Keeps `1 << shift` and the rounding offset comfortably inside 32-bit
/// arithmetic on the device.
pub const MAX_SLOPE_SHIFT: u8 = 30;

/// Accumulated slope error allowed over a full segment, in fixed-point units.
///
/// `n * multiplier / 2^shift` may differ from `n * slope` by at most half a
/// rounding unit at the far end of the segment.
pub const SLOPE_TOLERANCE_UNITS: f64 = 0.5;
