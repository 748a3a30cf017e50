//! Adaptive Segment-Length Search
//!
//! ## Problem
//!
//! From a given start index, find the longest run of samples one quantized
//! segment can cover within the error bound. Growing one sample at a time
//! costs O(domain²) fits over a 32768-code domain; the search below grows
//! geometrically while the error is far from the bound and switches to
//! shrinking additive steps near it.
//!
//! ## State Machine
//!
//! ```text
//! SEED ──(1 point left)──────────────────────────────────► DONE
//!   │
//!   ▼
//! PROBE (n = 2, always kept)
//!   │
//!   ▼
//! MULTIPLICATIVE ──(ratio ≥ 50% or ×2 rejected)──► ADDITIVE
//!   │  ×5 if ratio < 10%, ×2 if ratio < 50%    ◄──────┤  steps 500,200,…,2,1
//!   │                (ratio drops, ×2 below ceiling)  │
//!   └──────(domain end reached)──► DONE ◄──(step 1 rejected)
//! ```
//!
//! `ratio` is the kept candidate's max error over the bound. Every rejected
//! trial length becomes a ceiling: no later trial reaches it, so a rejected
//! ×5 falls back to ×2 and additive steps shrink until one fits below the
//! ceiling. A multiple is tried again from the additive phase whenever the
//! kept ratio allows it and the multiple stays below the ceiling, so a short
//! first additive step does not pin the rest of the search to single
//! samples. Each iteration either lengthens the kept candidate or lowers the
//! ceiling, which bounds the loop.

use crate::{
    config::FitConfig,
    constants::{ADDITIVE_STEPS, FIXED_POINT_SCALE},
    curve::ReferenceCurve,
    errors::FitResult,
    fixed_point::to_fixed_saturating,
};

use super::{
    evaluate::evaluate_segment,
    lstsq::fit_line,
    rational::quantize_slope,
    segment::{Segment, SegmentStats},
};

/// Segment accepted by the search together with its statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The quantized segment
    pub segment: Segment,
    /// Accuracy over the covered points
    pub stats: SegmentStats,
}

impl Candidate {
    /// Number of domain indices covered
    pub fn len(&self) -> usize {
        self.stats.points
    }

    /// Always false; a candidate covers at least its start index
    pub fn is_empty(&self) -> bool {
        self.stats.points == 0
    }
}

/// Growth phase of the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Multiply the kept length by 5 or 2
    Multiplicative,
    /// Add a step from [`ADDITIVE_STEPS`]
    Additive,
}

/// Next action chosen by [`plan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Try `length × factor`
    Multiply(usize),
    /// Try `length + step`
    Add(usize),
    /// No admissible trial is left
    Done,
}

/// Search bookkeeping the planner reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    /// Current phase
    pub phase: Phase,
    /// Max error of the kept candidate divided by the bound
    pub error_ratio: f64,
    /// Length of the kept candidate
    pub length: usize,
    /// Largest additive step allowed next
    pub step_cap: usize,
    /// Smallest rejected length (exclusive limit for trials)
    pub ceiling: usize,
    /// Points left in the domain from the segment start
    pub remaining: usize,
}

impl SearchState {
    /// Longest trial the state still admits
    fn limit(&self) -> usize {
        self.remaining.min(self.ceiling.saturating_sub(1))
    }
}

/// Choose the next trial. Pure function of the search state.
pub fn plan(state: &SearchState, config: &FitConfig) -> Plan {
    let limit = state.limit();
    if limit <= state.length {
        return Plan::Done;
    }

    let factors: &[usize] = if state.error_ratio < config.five_fold_ratio {
        &[5, 2]
    } else if state.error_ratio < config.two_fold_ratio {
        &[2]
    } else {
        &[]
    };

    // Trials are clamped to the domain end, so ×5 near the end still counts
    if let Some(&factor) = factors.iter().find(|&&factor| {
        state.length.saturating_mul(factor).min(state.remaining) < state.ceiling
    }) {
        return Plan::Multiply(factor);
    }

    let headroom = (limit - state.length).min(state.step_cap);
    match ADDITIVE_STEPS.iter().find(|&&step| step <= headroom) {
        Some(&step) => Plan::Add(step),
        None => Plan::Done,
    }
}

/// Fit, quantize and evaluate a segment of `points` indices at `start`.
pub fn try_segment(
    curve: &ReferenceCurve,
    start: usize,
    points: usize,
    config: &FitConfig,
) -> FitResult<(Candidate, bool)> {
    let window = curve.window(start, points);
    let line = fit_line(window, start)?;
    let slope = quantize_slope(line.slope, points, config.max_shift)?;

    let segment = Segment {
        start_index: start as u16,
        start_value: to_fixed_saturating(line.offset / FIXED_POINT_SCALE),
        slope_multiplier: slope.multiplier,
        slope_shift: slope.shift,
    };
    let eval = evaluate_segment(&segment, window, config.max_error);

    Ok((Candidate { segment, stats: eval.stats }, eval.keep))
}

/// Trivial one-point segment at `start`
fn seed(curve: &ReferenceCurve, start: usize, config: &FitConfig) -> Candidate {
    let window = curve.window(start, 1);
    let segment = Segment::flat(start as u16, to_fixed_saturating(window[0]));
    let eval = evaluate_segment(&segment, window, config.max_error);
    Candidate { segment, stats: eval.stats }
}

/// Two-point segment through the rounded endpoints.
///
/// Used when the fitted two-point candidate misses a very tight bound: its
/// rounded start value and rounded slope step can each add half a unit.
fn snapped_pair(curve: &ReferenceCurve, start: usize, config: &FitConfig) -> Candidate {
    let window = curve.window(start, 2);
    let first = to_fixed_saturating(window[0]);
    let second = to_fixed_saturating(window[1]);
    let segment = Segment {
        start_index: start as u16,
        start_value: first,
        slope_multiplier: second as i32 - first as i32,
        slope_shift: 0,
    };
    let eval = evaluate_segment(&segment, window, config.max_error);
    Candidate { segment, stats: eval.stats }
}

/// Longest acceptable segment starting at `start` and ending no later than `end`.
///
/// Only the indices are checked here; [`build_table`](super::build_table)
/// validates the reference values once for the whole domain.
pub fn search_segment(
    curve: &ReferenceCurve,
    start: usize,
    end: usize,
    config: &FitConfig,
) -> FitResult<Candidate> {
    curve.check_indices(start, end)?;
    let remaining = end - start + 1;

    // SEED
    let mut kept = seed(curve, start, config);
    if remaining == 1 {
        return Ok(kept);
    }

    // PROBE
    let (pair, keep) = try_segment(curve, start, 2, config)?;
    kept = if keep { pair } else { snapped_pair(curve, start, config) };

    let mut state = SearchState {
        phase: Phase::Multiplicative,
        error_ratio: kept.stats.max_error / config.max_error,
        length: 2,
        step_cap: 1,
        ceiling: remaining + 1,
        remaining,
    };

    loop {
        let trial = match plan(&state, config) {
            Plan::Done => break,
            Plan::Multiply(factor) => {
                state.phase = Phase::Multiplicative;
                (state.length * factor).min(state.remaining)
            }
            Plan::Add(step) => {
                state.phase = Phase::Additive;
                state.length + step
            }
        };

        let (candidate, keep) = try_segment(curve, start, trial, config)?;
        log_trace!(
            "segment at {}: trial {} points, max error {} ({})",
            start, trial, candidate.stats.max_error,
            if keep { "kept" } else { "rejected" }
        );

        if keep {
            let increment = trial - state.length;
            kept = candidate;
            state.length = trial;
            state.error_ratio = kept.stats.max_error / config.max_error;
            // Additive steps never exceed the last successful increment
            state.step_cap = increment;
        } else {
            state.ceiling = trial;
            if state.phase == Phase::Additive {
                state.step_cap = trial - state.length - 1;
            }
        }
    }

    Ok(kept)
}
