//! Table source generation
//!
//! Each emitter writes a self-contained file: a header comment with the
//! configuration it was generated from, the end code and the segment array.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use adcfit_core::{
    domain::{BoundaryWarning, DomainBounds},
    Table, TableSummary, ThermistorConfig,
};

use crate::args::Format;

/// Everything an emitter needs
pub struct Generated<'a> {
    /// Identifier of the table in the generated source
    pub name: &'a str,
    /// Configuration the table was built from
    pub config: &'a ThermistorConfig,
    /// Located domain
    pub bounds: &'a DomainBounds,
    /// Fitted table
    pub table: &'a Table,
}

/// Render `generated` in `format`
pub fn render(format: Format, generated: &Generated<'_>) -> Result<String> {
    Ok(match format {
        Format::Rust => rust(generated),
        Format::C => c(generated),
        Format::Json => json(generated)?,
    })
}

fn header(out: &mut String, comment: &str, generated: &Generated<'_>) {
    let config = generated.config;
    let summary = generated.table.summary();
    let _ = writeln!(out, "{} Auto-generated by adcfit {}", comment, adcfit_core::VERSION);
    let _ = writeln!(
        out,
        "{} Thermistor: R25 {} Ω, beta {} K, pull-up {} Ω, {}-bit ADC",
        comment, config.r25_ohms, config.beta_k, config.pullup_ohms, config.adc_bits
    );
    let _ = writeln!(
        out,
        "{} Range: {} °C to {} °C, codes {}..={}, max error {} °C",
        comment,
        config.t_min_c,
        config.t_max_c,
        generated.table.start_index(),
        generated.table.end_index(),
        config.max_error
    );
    let _ = writeln!(
        out,
        "{} Segments: {}, observed max error {:.4} °C, mean {:.4} °C",
        comment, summary.segments, summary.max_error, summary.mean_error
    );
    let _ = writeln!(
        out,
        "{} value(code) = start_value + round((code - start_index) * slope_multiplier / 2^slope_shift), 1/128 °C",
        comment
    );
    out.push('\n');
}

fn rust(generated: &Generated<'_>) -> String {
    let ident = generated.name.to_uppercase();
    let segments = generated.table.segments();
    let mut out = String::new();

    header(&mut out, "//", generated);
    out.push_str("use adcfit_core::Segment;\n\n");
    let _ = writeln!(out, "/// Last ADC code covered by [`{}`]", ident);
    let _ = writeln!(out, "pub const {}_END: u16 = {};\n", ident, generated.table.end_index());
    let _ = writeln!(out, "/// ADC code to temperature segments, sorted by `start_index`");
    let _ = writeln!(out, "pub const {}: [Segment; {}] = [", ident, segments.len());
    for s in segments {
        let _ = writeln!(
            out,
            "    Segment {{ start_index: {}, start_value: {}, slope_multiplier: {}, slope_shift: {} }},",
            s.start_index, s.start_value, s.slope_multiplier, s.slope_shift
        );
    }
    out.push_str("];\n");
    out
}

fn c(generated: &Generated<'_>) -> String {
    let name = generated.name.to_lowercase();
    let segments = generated.table.segments();
    let mut out = String::new();

    header(&mut out, "//", generated);
    out.push_str("#include <stdint.h>\n\n");
    out.push_str("#ifndef ADC_SEGMENT_DEFINED\n#define ADC_SEGMENT_DEFINED\n");
    out.push_str("struct adc_segment {\n");
    out.push_str("    uint16_t start_index;\n");
    out.push_str("    int16_t start_value;\n");
    out.push_str("    int32_t slope_multiplier;\n");
    out.push_str("    uint8_t slope_shift;\n");
    out.push_str("};\n#endif\n\n");
    let _ = writeln!(out, "#define {}_END {}u", name.to_uppercase(), generated.table.end_index());
    let _ = writeln!(out, "#define {}_LEN {}u\n", name.to_uppercase(), segments.len());
    let _ = writeln!(out, "static const struct adc_segment {}[{}] = {{", name, segments.len());
    for s in segments {
        let _ = writeln!(
            out,
            "    {{ {}, {}, {}, {} }},",
            s.start_index, s.start_value, s.slope_multiplier, s.slope_shift
        );
    }
    out.push_str("};\n");
    out
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    name: &'a str,
    version: &'a str,
    config: &'a ThermistorConfig,
    start_index: u16,
    end_index: u16,
    warnings: &'a [BoundaryWarning],
    summary: TableSummary,
    table: &'a Table,
    packed_hex: String,
}

fn json(generated: &Generated<'_>) -> Result<String> {
    let packed_hex = generated
        .table
        .to_bytes()
        .iter()
        .fold(String::new(), |mut acc, b| {
            let _ = write!(acc, "{:02x}", b);
            acc
        });

    let output = JsonOutput {
        name: generated.name,
        version: adcfit_core::VERSION,
        config: generated.config,
        start_index: generated.table.start_index(),
        end_index: generated.table.end_index(),
        warnings: &generated.bounds.warnings,
        summary: generated.table.summary(),
        table: generated.table,
        packed_hex,
    };
    let mut text = serde_json::to_string_pretty(&output)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcfit_core::{build_table, locate_domain, ReferenceCurve};

    fn fixture() -> (ThermistorConfig, DomainBounds, Table) {
        let config = ThermistorConfig::default();
        let curve = ReferenceCurve::from_fn(64, |i| 60.0 - (i * i) as f64 / 64.0);
        let bounds = locate_domain(&curve, -2.0, 60.0).unwrap();
        let table = build_table(&curve, bounds.start, bounds.end, &config.fit_config()).unwrap();
        (config, bounds, table)
    }

    #[test]
    fn rust_output_declares_array_and_end() {
        let (config, bounds, table) = fixture();
        let generated = Generated { name: "ntc_table", config: &config, bounds: &bounds, table: &table };
        let text = render(Format::Rust, &generated).unwrap();

        assert!(text.contains("pub const NTC_TABLE_END: u16 = 63;"));
        assert!(text.contains(&format!("pub const NTC_TABLE: [Segment; {}] = [", table.len())));
        assert_eq!(text.matches("Segment { start_index:").count(), table.len());
        assert!(text.contains("    Segment { start_index: 0, start_value: "));
    }

    #[test]
    fn c_output_declares_struct_array() {
        let (config, bounds, table) = fixture();
        let generated = Generated { name: "NTC", config: &config, bounds: &bounds, table: &table };
        let text = render(Format::C, &generated).unwrap();

        assert!(text.contains("struct adc_segment {"));
        assert!(text.contains("#define NTC_END 63u"));
        assert!(text.contains(&format!("static const struct adc_segment ntc[{}] = {{", table.len())));
        assert!(text.contains("    { 0, "));
    }

    #[test]
    fn json_output_round_trips_table() {
        let (config, bounds, table) = fixture();
        let generated = Generated { name: "ntc", config: &config, bounds: &bounds, table: &table };
        let text = render(Format::Json, &generated).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["end_index"], 63);
        assert_eq!(value["summary"]["segments"], table.len());
        let parsed: Table = serde_json::from_value(value["table"].clone()).unwrap();
        assert_eq!(parsed.segments(), table.segments());
        assert_eq!(
            value["packed_hex"].as_str().unwrap().len(),
            2 * table.summary().packed_bytes
        );
    }
}
