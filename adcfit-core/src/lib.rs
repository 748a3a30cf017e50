//! Core table generator for adcfit
//!
//! Compresses a nonlinear sensor transfer curve, sampled once per ADC code, into
//! a short table of fixed-point linear segments. Each segment is an integer start
//! value plus a `multiplier / 2^shift` slope, so a microcontroller evaluates it
//! with one multiply and one rounded shift. No floating point, no division.
//!
//! Key constraints:
//! - Every covered ADC code stays within the caller's error bound
//! - Domains up to 2^15 codes (15-bit ADCs)
//! - Deterministic: the same curve and bound always give the same table
//!
//! ```no_run
//! use adcfit_core::{build_table, FitConfig, ReferenceCurve};
//!
//! // Any decreasing curve works; a thermistor model lives in `sensor`.
//! let curve = ReferenceCurve::from_fn(4096, |code| 120.0 - code as f64 * 0.05);
//! let config = FitConfig::default().with_max_error(0.1);
//!
//! let table = build_table(&curve, 0, 4095, &config)?;
//! assert_eq!(table.end_index(), 4095);
//! # Ok::<(), adcfit_core::FitError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod curve;
pub mod domain;
pub mod errors;
pub mod fit;
pub mod fixed_point;
pub mod lookup;
pub mod sensor;

// Public API
pub use config::FitConfig;
pub use curve::ReferenceCurve;
pub use domain::{locate_domain, BoundaryWarning, DomainBounds};
pub use errors::{FitError, FitResult};
pub use fit::{build_table, Segment, SegmentStats, Table, TableSummary};
pub use lookup::SegmentTable;
pub use sensor::ThermistorConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
