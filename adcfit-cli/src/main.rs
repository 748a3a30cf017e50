//! adcfit: thermistor interpolation table generator
//!
//! Samples an NTC divider model at every ADC code, fits a fixed-point
//! piecewise-linear table within the requested error bound and writes it as
//! Rust, C or JSON.
//!
//! ```text
//! adcfit --preset ntc-10k --max-error 0.1 --format c --name ntc -o ntc_table.h
//! ```

mod args;
mod emit;
mod report;

use anyhow::{Context, Result};
use clap::Parser;

use args::Cli;
use emit::Generated;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the generated table
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.thermistor_config()?;
    tracing::info!(?config, "fitting table");

    let result = config
        .generate_table()
        .context("table generation failed")?;
    report::report(&result);

    let text = emit::render(
        cli.format,
        &Generated {
            name: &cli.name,
            config: &config,
            bounds: &result.bounds,
            table: &result.table,
        },
    )?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}
