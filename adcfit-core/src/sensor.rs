//! NTC Thermistor Model
//!
//! ## Circuit
//!
//! The thermistor sits on the low side of a ratiometric divider with a
//! fixed pull-up to the ADC reference:
//!
//! ```text
//!   Vref ── R_pullup ──┬── ADC
//!                      │
//!                   R_ntc(T)
//!                      │
//!                     GND
//!
//! code = N · R / (R + R_pullup)     N = 2^adc_bits
//! R    = R_pullup · code / (N - code)
//! ```
//!
//! Hot means low resistance means low code, so temperature decreases as the
//! code rises and the table runs from `t_max` down to `t_min`.
//!
//! ## Beta Equation
//!
//! ```text
//! 1/T = 1/T25 + ln(R / R25) / β       (T in kelvin)
//! ```
//!
//! Accurate to a few tenths of a degree over the 0-100 °C span a beta value
//! is specified for. Code 0 (R = 0) has no finite temperature and never
//! enters a table domain.

use crate::{
    config::FitConfig,
    constants::{
        thermistor::{
            DEFAULT_ADC_BITS, MAX_ADC_BITS, NTC_100K_BETA_K, NTC_100K_R25_OHMS,
            NTC_10K_BETA_K, NTC_10K_R25_OHMS,
        },
        KELVIN_OFFSET, NOMINAL_TEMP_C,
    },
    curve::ReferenceCurve,
    domain::{locate_domain, DomainBounds},
    errors::{FitError, FitResult},
    fit::{build_table, Table},
};

/// Thermistor, divider and table parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThermistorConfig {
    /// Resistance at 25 °C (Ω)
    pub r25_ohms: f64,
    /// Beta coefficient (K)
    pub beta_k: f64,
    /// Divider pull-up (Ω)
    pub pullup_ohms: f64,
    /// ADC resolution (bits)
    pub adc_bits: u8,
    /// Lowest temperature the table must cover (°C)
    pub t_min_c: f64,
    /// Highest temperature the table must cover (°C)
    pub t_max_c: f64,
    /// Interpolation error bound (°C)
    pub max_error: f64,
}

impl Default for ThermistorConfig {
    fn default() -> Self {
        Self::ntc_10k_3950()
    }
}

/// Names accepted by [`ThermistorConfig::preset`]
pub const PRESET_NAMES: [&str; 3] = ["ntc-10k", "hotend-100k", "precision"];

impl ThermistorConfig {
    /// 10k/3950 bead with a 10k pull-up on a 12-bit ADC, -20 to 100 °C
    pub fn ntc_10k_3950() -> Self {
        Self {
            r25_ohms: NTC_10K_R25_OHMS,
            beta_k: NTC_10K_BETA_K,
            pullup_ohms: 10_000.0,
            adc_bits: DEFAULT_ADC_BITS,
            t_min_c: -20.0,
            t_max_c: 100.0,
            max_error: 0.1,
        }
    }

    /// 100k hot-end thermistor with a 4.7k pull-up, 20 to 250 °C
    pub fn ntc_100k_hotend() -> Self {
        Self {
            r25_ohms: NTC_100K_R25_OHMS,
            beta_k: NTC_100K_BETA_K,
            pullup_ohms: 4_700.0,
            adc_bits: DEFAULT_ADC_BITS,
            t_min_c: 20.0,
            t_max_c: 250.0,
            max_error: 0.5,
        }
    }

    /// 10k/3950 on a 15-bit ADC, 0 to 50 °C at 0.02 °C
    pub fn precision() -> Self {
        Self {
            adc_bits: MAX_ADC_BITS,
            t_min_c: 0.0,
            t_max_c: 50.0,
            max_error: 0.02,
            ..Self::ntc_10k_3950()
        }
    }

    /// Preset by name, see [`PRESET_NAMES`]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "ntc-10k" => Some(Self::ntc_10k_3950()),
            "hotend-100k" => Some(Self::ntc_100k_hotend()),
            "precision" => Some(Self::precision()),
            _ => None,
        }
    }

    /// Check the parameters describe a working circuit
    pub fn validate(&self) -> FitResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.r25_ohms) || !positive(self.pullup_ohms) {
            return Err(FitError::InvalidConfig {
                reason: "resistances must be positive",
            });
        }
        if !positive(self.beta_k) {
            return Err(FitError::InvalidConfig {
                reason: "beta must be positive",
            });
        }
        if self.adc_bits < 2 || self.adc_bits > MAX_ADC_BITS {
            return Err(FitError::InvalidConfig {
                reason: "ADC resolution must lie in [2, 15] bits",
            });
        }
        if !self.t_min_c.is_finite() || !self.t_max_c.is_finite() || self.t_min_c >= self.t_max_c {
            return Err(FitError::InvalidConfig {
                reason: "temperature range must be finite with min < max",
            });
        }
        self.fit_config().validate()
    }

    /// Number of ADC codes, `2^adc_bits`
    pub fn adc_codes(&self) -> usize {
        1usize << self.adc_bits
    }

    /// Thermistor resistance that produces `code`
    pub fn resistance_at_code(&self, code: usize) -> f64 {
        let full_scale = self.adc_codes() as f64;
        let code = code as f64;
        self.pullup_ohms * code / (full_scale - code)
    }

    /// Beta-equation temperature (°C) at `resistance`.
    ///
    /// NaN where the equation has no physical solution.
    pub fn temperature_at_resistance(&self, resistance: f64) -> f64 {
        let inv_t = 1.0 / (NOMINAL_TEMP_C + KELVIN_OFFSET)
            + libm::log(resistance / self.r25_ohms) / self.beta_k;
        if !(inv_t > 0.0) {
            return f64::NAN;
        }
        1.0 / inv_t - KELVIN_OFFSET
    }

    /// Temperature (°C) read at `code`
    pub fn temperature_at_code(&self, code: usize) -> f64 {
        self.temperature_at_resistance(self.resistance_at_code(code))
    }

    /// Temperature for every ADC code
    pub fn reference_curve(&self) -> ReferenceCurve {
        ReferenceCurve::from_fn(self.adc_codes(), |code| self.temperature_at_code(code))
    }

    /// Fit parameters derived from this configuration
    pub fn fit_config(&self) -> FitConfig {
        FitConfig::default().with_max_error(self.max_error)
    }

    /// Sample the model, locate the domain and fit the table.
    pub fn generate_table(&self) -> FitResult<ThermistorTable> {
        self.validate()?;

        let curve = self.reference_curve();
        let bounds = locate_domain(&curve, self.t_min_c, self.t_max_c)?;
        let table = build_table(&curve, bounds.start, bounds.end, &self.fit_config())?;

        log_debug!(
            "thermistor table: codes {}..={} in {} segments",
            bounds.start, bounds.end, table.len()
        );

        Ok(ThermistorTable { curve, bounds, table })
    }
}

/// Output of [`ThermistorConfig::generate_table`]
#[derive(Debug, Clone, PartialEq)]
pub struct ThermistorTable {
    /// Sampled model
    pub curve: ReferenceCurve,
    /// Located domain with any boundary warnings
    pub bounds: DomainBounds,
    /// Fitted table
    pub table: Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_point() {
        let config = ThermistorConfig::default();
        assert_eq!(config.adc_codes(), 4096);
        // Midscale means R = pull-up = R25
        assert_eq!(config.resistance_at_code(2048), 10_000.0);
        assert!(libm::fabs(config.temperature_at_code(2048) - 25.0) < 1e-9);
    }

    #[test]
    fn temperature_falls_with_code() {
        let config = ThermistorConfig::default();
        let curve = config.reference_curve();
        assert!(!curve.values()[0].is_finite() || curve.values()[0] > 250.0);
        for code in 200..4000 {
            assert!(curve.values()[code] > curve.values()[code + 1], "code {}", code);
        }
    }

    #[test]
    fn unphysical_resistance_is_nan() {
        let config = ThermistorConfig::default();
        assert!(config.temperature_at_resistance(0.0).is_nan());
        assert!(config.temperature_at_resistance(-5.0).is_nan());
    }

    #[test]
    fn presets_validate() {
        for name in PRESET_NAMES {
            let config = ThermistorConfig::preset(name).unwrap();
            assert!(config.validate().is_ok(), "{}", name);
        }
        assert_eq!(ThermistorConfig::preset("ptc"), None);
    }

    #[test]
    fn rejects_broken_circuits() {
        let base = ThermistorConfig::default();
        let cases = [
            ThermistorConfig { pullup_ohms: 0.0, ..base },
            ThermistorConfig { beta_k: -1.0, ..base },
            ThermistorConfig { adc_bits: 16, ..base },
            ThermistorConfig { t_min_c: 50.0, t_max_c: 10.0, ..base },
        ];
        for config in cases {
            assert!(matches!(config.validate(), Err(FitError::InvalidConfig { .. })));
        }
        assert!(matches!(
            ThermistorConfig { max_error: 0.001, ..base }.validate(),
            Err(FitError::BoundTooSmall { .. })
        ));
    }

    #[test]
    fn default_preset_generates_table() {
        let config = ThermistorConfig::default();
        let result = config.generate_table().unwrap();
        assert!(result.bounds.warnings.is_empty());
        assert!(result.curve.values()[result.bounds.start] >= 100.0);
        assert!(result.curve.values()[result.bounds.end] <= -20.0);
        assert_eq!(result.table.start_index() as usize, result.bounds.start);
        assert_eq!(result.table.end_index() as usize, result.bounds.end);
        assert!(result.table.summary().max_error <= 0.1);
    }

    #[test]
    fn hot_end_range_is_reachable() {
        let result = ThermistorConfig::ntc_100k_hotend().generate_table().unwrap();
        assert!(result.bounds.warnings.is_empty());
        assert!(result.table.summary().max_error <= 0.5);
    }
}
