//! Probe list and latency bars.

use crate::fmt;
use crate::model::{ProbeKind, QueryProbeResult};
use crate::view::common::{
    BarPoint, RowStyleClass, Section, TableViewModel, ViewCell, ViewRow,
};

const PROBE_HEADERS: &[&str] = &["PROBE", "STATUS", "TIME", "ERROR"];
const PROBE_WIDTHS: &[u16] = &[20, 8, 10, 40];

/// Bars in the report chart.
pub const REPORT_PROBE_BARS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbesViewModel {
    pub table: TableViewModel<ProbeKind>,
    /// Latency in milliseconds of successful probes, in probe order.
    pub bars: Vec<BarPoint>,
}

/// Unavailable when no probe succeeded (typically: no connection).
pub fn build_probes(result: &QueryProbeResult) -> Section<ProbesViewModel> {
    if result.success_count() == 0 {
        return match result.iter().find_map(|(_, o)| o.error.as_deref()) {
            Some(error) => Section::Unavailable(format!(
                "Query probes unavailable: {}",
                fmt::normalize_for_display(error)
            )),
            None => Section::unavailable("Query probes"),
        };
    }

    let mut table = TableViewModel::new("Query probes", PROBE_HEADERS, PROBE_WIDTHS);
    for (kind, outcome) in result.iter() {
        let (status, time, style) = match outcome.execution_time_ms() {
            Some(ms) if outcome.success => ("OK", fmt::format_ms(ms), RowStyleClass::Normal),
            _ => ("FAILED", "-".to_string(), RowStyleClass::Critical),
        };
        let error = outcome
            .error
            .as_deref()
            .map(fmt::normalize_for_display)
            .unwrap_or_default();
        table.rows.push(ViewRow {
            id: kind,
            cells: vec![
                ViewCell::plain(kind.name()),
                ViewCell::plain(status),
                ViewCell::plain(time),
                ViewCell::plain(error),
            ],
            style,
        });
    }

    Section::Available(ProbesViewModel {
        table,
        bars: probe_bars(result, ProbeKind::all().len()),
    })
}

/// First `limit` successful probes as millisecond bars.
pub fn probe_bars(result: &QueryProbeResult, limit: usize) -> Vec<BarPoint> {
    result
        .iter()
        .filter(|(_, o)| o.success)
        .filter_map(|(kind, o)| {
            o.execution_time_ms().map(|ms| BarPoint {
                label: kind.name().to_string(),
                value: ms,
            })
        })
        .take(limit)
        .collect()
}
