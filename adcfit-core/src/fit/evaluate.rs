//! Segment error evaluation
//!
//! Replays a quantized segment exactly as the device will, through
//! [`Segment::value_at`], and measures it against the reference window.

use super::segment::{Segment, SegmentStats};

/// Outcome of evaluating one candidate segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// True iff the maximum error is within the bound
    pub keep: bool,
    /// Error statistics over the window
    pub stats: SegmentStats,
}

/// Evaluate `segment` over `reference` (real units, one value per local offset).
pub fn evaluate_segment(segment: &Segment, reference: &[f64], max_error: f64) -> Evaluation {
    let mut sum = 0.0;
    let mut max = 0.0f64;

    for (offset, &expected) in reference.iter().enumerate() {
        let error = libm::fabs(segment.real_value_at(offset as u32) - expected);
        sum += error;
        max = max.max(error);
    }

    let points = reference.len();
    let mean = if points == 0 { 0.0 } else { sum / points as f64 };

    Evaluation {
        keep: max <= max_error,
        stats: SegmentStats {
            points,
            mean_error: mean,
            max_error: max,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_segment_has_zero_error() {
        let segment = Segment {
            start_index: 0,
            start_value: 1280,
            slope_multiplier: -1,
            slope_shift: 1,
        };
        // 10.0 - i/256, rounded onto the 1/128 grid half away from zero
        let reference = [10.0, 10.0 - 1.0 / 128.0, 10.0 - 1.0 / 128.0, 10.0 - 2.0 / 128.0];
        let eval = evaluate_segment(&segment, &reference, 0.01);
        assert!(eval.keep);
        assert_eq!(eval.stats.points, 4);
        assert_eq!(eval.stats.max_error, 0.0);
        assert_eq!(eval.stats.mean_error, 0.0);
    }

    #[test]
    fn reports_mean_and_max() {
        let segment = Segment::flat(0, 0);
        let reference = [0.0, 0.25, -0.5, 0.25];
        let eval = evaluate_segment(&segment, &reference, 0.4);
        assert!(!eval.keep);
        assert_eq!(eval.stats.max_error, 0.5);
        assert_eq!(eval.stats.mean_error, 0.25);
    }

    #[test]
    fn bound_is_inclusive() {
        let segment = Segment::flat(0, 0);
        let eval = evaluate_segment(&segment, &[0.5], 0.5);
        assert!(eval.keep);
    }
}
