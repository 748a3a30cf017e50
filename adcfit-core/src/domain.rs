//! Table Boundary Location
//!
//! Maps a requested value range `[low, high]` onto domain indices of a
//! decreasing reference curve. The table starts at the highest value and
//! ends at the lowest:
//!
//! ```text
//! start = last usable index with value >= high
//! end   = first usable index with value <= low
//! ```
//!
//! An index is usable when its value is finite and representable in 1/128
//! units. If the requested range extends past what the ADC can resolve (no
//! usable index reaches `high`, say) the boundary snaps to the outermost
//! usable index and a [`BoundaryWarning`] records the difference. The table
//! is still produced.

use core::fmt;

use crate::{
    constants::FIXED_POINT_RESOLUTION,
    curve::ReferenceCurve,
    errors::{FitError, FitResult},
    fixed_point::in_fixed_range,
};

/// Which end of the table a warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// First index, highest value
    Start,
    /// Last index, lowest value
    End,
}

/// Realized boundary differs from the requested one by more than one unit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryWarning {
    /// Affected boundary
    pub edge: Edge,
    /// Requested value
    pub requested: f64,
    /// Reference value at the realized index
    pub realized: f64,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = match self.edge {
            Edge::Start => "upper",
            Edge::End => "lower",
        };
        write!(
            f,
            "{} bound {:.3} not reachable, table limited to {:.3}",
            edge, self.requested, self.realized
        )
    }
}

/// Located table domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainBounds {
    /// First domain index (highest value)
    pub start: usize,
    /// Last domain index (lowest value)
    pub end: usize,
    /// Boundaries that had to snap
    pub warnings: heapless::Vec<BoundaryWarning, 2>,
}

impl DomainBounds {
    /// Number of codes in `[start, end]`, at least one
    pub fn points(&self) -> usize {
        self.end - self.start + 1
    }
}

fn usable(value: f64) -> bool {
    value.is_finite() && in_fixed_range(value)
}

/// Locate `[low, high]` on a decreasing `curve`.
pub fn locate_domain(curve: &ReferenceCurve, low: f64, high: f64) -> FitResult<DomainBounds> {
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(FitError::InvalidConfig {
            reason: "range must be finite with low < high",
        });
    }

    let values = curve.values();
    let invalid = FitError::InvalidDomain { start: 0, end: 0, len: values.len() };

    let first_usable = values.iter().position(|&v| usable(v)).ok_or(invalid)?;
    let last_usable = values.iter().rposition(|&v| usable(v)).ok_or(invalid)?;

    let start = values
        .iter()
        .enumerate()
        .rev()
        .find(|&(_, &v)| usable(v) && v >= high)
        .map_or(first_usable, |(i, _)| i);
    let end = values
        .iter()
        .enumerate()
        .find(|&(_, &v)| usable(v) && v <= low)
        .map_or(last_usable, |(i, _)| i);

    if start > end {
        return Err(FitError::InvalidDomain { start, end, len: values.len() });
    }

    let mut warnings = heapless::Vec::new();
    for (edge, requested, realized) in [
        (Edge::Start, high, values[start]),
        (Edge::End, low, values[end]),
    ] {
        let short = match edge {
            Edge::Start => requested - realized,
            Edge::End => realized - requested,
        };
        if short > FIXED_POINT_RESOLUTION {
            let warning = BoundaryWarning { edge, requested, realized };
            log_warn!("{}", warning);
            // Capacity matches the two edges
            let _ = warnings.push(warning);
        }
    }

    log_debug!("domain [{}, {}] for range [{}, {}]", start, end, low, high);
    Ok(DomainBounds { start, end, warnings })
}
