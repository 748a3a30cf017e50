//! Command line arguments

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};

use adcfit_core::{sensor::PRESET_NAMES, ThermistorConfig};

/// Output language of the generated table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `const` array of `adcfit_core::Segment`
    Rust,
    /// `static const struct` array with an end-code define
    C,
    /// Table, statistics and configuration as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "adcfit", version)]
#[command(about = "Fit a fixed-point piecewise-linear ADC-to-temperature table")]
pub struct Cli {
    /// Thermistor preset: ntc-10k, hotend-100k, precision
    #[arg(short, long, default_value = "ntc-10k")]
    pub preset: String,

    /// JSON thermistor configuration, used instead of the preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Resistance at 25 °C (Ω)
    #[arg(long)]
    pub r25: Option<f64>,

    /// Beta coefficient (K)
    #[arg(long)]
    pub beta: Option<f64>,

    /// Divider pull-up (Ω)
    #[arg(long)]
    pub pullup: Option<f64>,

    /// ADC resolution (bits)
    #[arg(long)]
    pub adc_bits: Option<u8>,

    /// Lowest table temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub t_min: Option<f64>,

    /// Highest table temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub t_max: Option<f64>,

    /// Interpolation error bound (°C)
    #[arg(short = 'e', long)]
    pub max_error: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Rust)]
    pub format: Format,

    /// Identifier of the generated table
    #[arg(short, long, default_value = "ntc_table", value_parser = parse_identifier)]
    pub name: String,

    /// Output file, stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// More log output (repeat for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Accept `[A-Za-z_][A-Za-z0-9_]*`, the identifiers valid in both Rust and C
fn parse_identifier(s: &str) -> Result<String, String> {
    let mut chars = s.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(s.to_string())
    } else {
        Err(format!("'{s}' is not a valid identifier"))
    }
}

impl Cli {
    /// Preset or config file with command line overrides applied
    pub fn thermistor_config(&self) -> Result<ThermistorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => ThermistorConfig::preset(&self.preset).ok_or_else(|| {
                anyhow!(
                    "unknown preset '{}', expected one of {}",
                    self.preset,
                    PRESET_NAMES.join(", ")
                )
            })?,
        };

        if let Some(v) = self.r25 {
            config.r25_ohms = v;
        }
        if let Some(v) = self.beta {
            config.beta_k = v;
        }
        if let Some(v) = self.pullup {
            config.pullup_ohms = v;
        }
        if let Some(v) = self.adc_bits {
            config.adc_bits = v;
        }
        if let Some(v) = self.t_min {
            config.t_min_c = v;
        }
        if let Some(v) = self.t_max {
            config.t_max_c = v;
        }
        if let Some(v) = self.max_error {
            config.max_error = v;
        }

        config.validate().context("invalid thermistor configuration")?;
        Ok(config)
    }

    /// Log level from `-v`/`-q`
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
