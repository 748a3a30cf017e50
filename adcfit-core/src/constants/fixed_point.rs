//! Fixed-Point Value Representation
//!
//! Segment start values and lookup results are signed 16-bit integers in
//! units of 1/128 (Q9.7). For temperatures that gives ±256 °C of range with
//! 0.0078 °C resolution, which covers every NTC application this tool targets.

/// Number of fractional bits in a fixed-point value.
pub const FIXED_POINT_FRACTION_BITS: u32 = 7;

/// Fixed-point units per real unit (2^7).
///
/// Reference values are multiplied by this before fitting so the least-squares
/// solve and the slope quantizer work directly in table units.
pub const FIXED_POINT_SCALE: f64 = 128.0;

/// Smallest representable step in real units (1/128).
pub const FIXED_POINT_RESOLUTION: f64 = 1.0 / FIXED_POINT_SCALE;

/// Lowest real value a table entry can hold (-256.0).
///
/// Source: `i16::MIN / 128`
pub const FIXED_VALUE_MIN: f64 = i16::MIN as f64 / FIXED_POINT_SCALE;

/// Highest real value a table entry can hold (255.9921875).
///
/// Source: `i16::MAX / 128`
pub const FIXED_VALUE_MAX: f64 = i16::MAX as f64 / FIXED_POINT_SCALE;

/// Largest supported domain (number of ADC codes).
///
/// Bounded by the widest ADC the lookup supports (15 bits) so that every
/// `start_index` fits in the packed `u16` field with headroom.
pub const MAX_DOMAIN_SIZE: usize = 1 << 15;

/// Minimum admissible error bound, exclusive (half the resolution).
///
/// Rounding a reference value onto the 1/128 grid alone can cost this much,
/// so no table can promise anything tighter.
pub const MIN_ERROR_BOUND: f64 = FIXED_POINT_RESOLUTION / 2.0;
