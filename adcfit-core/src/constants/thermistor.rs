//! Thermistor Physics and Part Defaults
//!
//! Values for the beta-equation NTC model in [`crate::sensor`].

/// Offset between Celsius and Kelvin.
///
/// Source: SI definition
pub const KELVIN_OFFSET: f64 = 273.15;

/// Reference temperature for the nominal resistance (°C).
///
/// Source: Thermistor datasheets specify R25 at 25 °C
pub const NOMINAL_TEMP_C: f64 = 25.0;

/// Nominal resistance of the common 10k NTC (Ω at 25 °C).
pub const NTC_10K_R25_OHMS: f64 = 10_000.0;

/// Beta of the common 10k NTC (K, 25/50 °C pair).
///
/// Source: Typical 10k 3950 epoxy bead thermistor datasheet
pub const NTC_10K_BETA_K: f64 = 3950.0;

/// Nominal resistance of the 100k NTC used on 3D-printer hot ends (Ω at 25 °C).
pub const NTC_100K_R25_OHMS: f64 = 100_000.0;

/// Beta of the 100k hot-end NTC (K).
///
/// Source: Semitec 104GT-2 datasheet
pub const NTC_100K_BETA_K: f64 = 4267.0;

/// Default ADC resolution (bits).
pub const DEFAULT_ADC_BITS: u8 = 12;

/// Widest ADC resolution the tables support (bits).
pub const MAX_ADC_BITS: u8 = 15;
