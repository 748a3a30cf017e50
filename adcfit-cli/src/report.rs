//! Human-readable fit report on stderr

use adcfit_core::{sensor::ThermistorTable, ReferenceCurve, Table};

/// Per-segment line of the report
fn segment_line(table: &Table, curve: &ReferenceCurve, i: usize) -> Option<String> {
    let segment = table.segments().get(i)?;
    let stats = table.stats().get(i)?;
    let end = table.segment_end(i)?;
    let t_start = curve.get(segment.start_index as usize)?;
    let t_end = curve.get(end as usize)?;

    Some(format!(
        "  {:>3}  codes {:>5}..={:<5} {:>8.2} .. {:>8.2} °C  {:>5} pts  slope {:>8}/2^{:<2}  max {:.4}  mean {:.4}",
        i,
        segment.start_index,
        end,
        t_start,
        t_end,
        stats.points,
        segment.slope_multiplier,
        segment.slope_shift,
        stats.max_error,
        stats.mean_error
    ))
}

/// Log boundary warnings and the table summary.
///
/// The segment listing is only produced at debug verbosity.
pub fn report(result: &ThermistorTable) {
    for warning in &result.bounds.warnings {
        tracing::warn!("{}", warning);
    }

    let summary = result.table.summary();
    tracing::info!(
        segments = summary.segments,
        points = summary.points,
        max_error = summary.max_error,
        mean_error = summary.mean_error,
        packed_bytes = summary.packed_bytes,
        "table for codes {}..={}",
        result.table.start_index(),
        result.table.end_index()
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        for i in 0..result.table.len() {
            if let Some(line) = segment_line(&result.table, &result.curve, i) {
                tracing::debug!("{}", line);
            }
        }
    }
}
