//! Constants for adcfit Core
//!
//! Centralized numeric values used by the fitter, the lookup and the sensor
//! model. Every constant carries its unit and where the value comes from.
//!
//! ## Organization
//!
//! - **Fixed point**: the 1/128 value representation and its limits
//! - **Search**: segment-length line search schedule and slope quantization limits
//! - **Thermistor**: physical constants and default part parameters
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include the unit in the name where one applies
//! 3. Keep firmware-visible limits (`u16`/`i16`/`i32` field ranges) here so the
//!    host-side generator and the device-side lookup agree

/// Fixed-point value representation shared by the generator and the lookup.
pub mod fixed_point;

/// Line search schedule and rational slope limits.
pub mod search;

/// Thermistor physics and default part parameters.
pub mod thermistor;

pub use fixed_point::{
    FIXED_POINT_FRACTION_BITS, FIXED_POINT_SCALE, FIXED_POINT_RESOLUTION,
    FIXED_VALUE_MIN, FIXED_VALUE_MAX, MAX_DOMAIN_SIZE, MIN_ERROR_BOUND,
};

pub use search::{
    ADDITIVE_STEPS, MAX_SLOPE_SHIFT, FIVE_FOLD_ERROR_RATIO, TWO_FOLD_ERROR_RATIO,
    SLOPE_TOLERANCE_UNITS,
};

pub use thermistor::{KELVIN_OFFSET, NOMINAL_TEMP_C};
