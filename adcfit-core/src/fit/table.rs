//! Table assembly
//!
//! Runs the segment search from the table start to its end index. Each
//! accepted segment starts exactly where the previous one stopped, so the
//! result covers `[start, end]` without gaps or overlaps.

use alloc::vec::Vec;

use crate::{
    config::FitConfig,
    curve::ReferenceCurve,
    errors::FitResult,
    lookup::{codec, SegmentTable},
};

use super::{
    search::search_segment,
    segment::{Segment, SegmentStats},
};

/// Ordered interpolation table with per-segment statistics
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    segments: Vec<Segment>,
    stats: Vec<SegmentStats>,
    end_index: u16,
}

/// Aggregate accuracy and size of a table
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSummary {
    /// Number of segments
    pub segments: usize,
    /// Number of domain indices covered
    pub points: usize,
    /// Mean absolute error over every covered index
    pub mean_error: f64,
    /// Largest absolute error of any covered index
    pub max_error: f64,
    /// Size of the packed firmware encoding
    pub packed_bytes: usize,
}

impl Table {
    /// Segments in ascending `start_index` order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Statistics, one entry per segment
    pub fn stats(&self) -> &[SegmentStats] {
        &self.stats
    }

    /// Segments paired with their statistics
    pub fn iter(&self) -> impl Iterator<Item = (&Segment, &SegmentStats)> {
        self.segments.iter().zip(self.stats.iter())
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if the table has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First covered domain index
    pub fn start_index(&self) -> u16 {
        self.segments.first().map_or(self.end_index, |s| s.start_index)
    }

    /// Last covered domain index
    pub fn end_index(&self) -> u16 {
        self.end_index
    }

    /// Last domain index covered by segment `i`
    pub fn segment_end(&self, i: usize) -> Option<u16> {
        self.segments.get(i)?;
        Some(match self.segments.get(i + 1) {
            Some(next) => next.start_index - 1,
            None => self.end_index,
        })
    }

    /// Device-side view of the table
    pub fn lookup(&self) -> SegmentTable<'_> {
        SegmentTable::new(&self.segments, self.end_index)
    }

    /// Packed firmware encoding
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode_table(&self.segments, self.end_index)
    }

    /// Aggregate statistics
    pub fn summary(&self) -> TableSummary {
        let points: usize = self.stats.iter().map(|s| s.points).sum();
        let weighted: f64 = self.stats.iter().map(|s| s.mean_error * s.points as f64).sum();
        let max_error = self.stats.iter().fold(0.0f64, |acc, s| acc.max(s.max_error));

        TableSummary {
            segments: self.segments.len(),
            points,
            mean_error: if points == 0 { 0.0 } else { weighted / points as f64 },
            max_error,
            packed_bytes: codec::encoded_len(self.segments.len()),
        }
    }
}

/// Build the interpolation table for `curve` over `[start, end]`.
///
/// Validates the configuration and the domain first; any error aborts the
/// whole run.
pub fn build_table(
    curve: &ReferenceCurve,
    start: usize,
    end: usize,
    config: &FitConfig,
) -> FitResult<Table> {
    config.validate()?;
    curve.validate_domain(start, end)?;

    let mut segments = Vec::new();
    let mut stats = Vec::new();
    let mut next_start = start;

    loop {
        let candidate = search_segment(curve, next_start, end, config)?;
        log_debug!(
            "segment {}: start {} points {} max error {:.4}",
            segments.len(), next_start, candidate.len(), candidate.stats.max_error
        );

        segments.push(candidate.segment);
        stats.push(candidate.stats);

        let covered_end = next_start + candidate.len() - 1;
        if covered_end >= end {
            break;
        }
        next_start = covered_end + 1;
    }

    Ok(Table {
        segments,
        stats,
        end_index: end as u16,
    })
}
