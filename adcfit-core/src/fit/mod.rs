//! Table fitting
//!
//! The pipeline for one segment is fit, quantize, evaluate:
//!
//! 1. [`fit_line`] finds the least-squares line through a window of the
//!    reference curve, in 1/128 units
//! 2. [`quantize_slope`] turns its slope into `multiplier / 2^shift`
//! 3. [`evaluate_segment`] replays the quantized segment the way the device
//!    does and measures the worst error
//!
//! [`search_segment`] drives that pipeline to find the longest acceptable
//! segment at a start index, and [`build_table`] chains segments until the
//! domain is covered.

mod evaluate;
mod lstsq;
mod rational;
mod search;
mod segment;
mod table;

pub use evaluate::{evaluate_segment, Evaluation};
pub use lstsq::{fit_line, LineFit};
pub use rational::{quantize_slope, RationalSlope};
pub use search::{plan, search_segment, try_segment, Candidate, Phase, Plan, SearchState};
pub use segment::{Segment, SegmentStats};
pub use table::{build_table, Table, TableSummary};
