//! Exported dashboard report.
//!
//! One static portrait PNG (1080×1920) assembled from a fresh snapshot:
//! header, connectivity card, server card, four metric tiles, probe latency
//! bars, table size bars and a footer. The TUI preview popup renders the same
//! [`ReportData`].

mod png;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tracing::info;

use crate::model::DashboardSnapshot;
use crate::view::common::{BarPoint, CardViewModel, Section, TileViewModel};
use crate::view::connection::build_connection_card;
use crate::view::metrics::{MetricTile, build_metric_tiles};
use crate::view::objects::{REPORT_TABLE_BARS, table_size_bars};
use crate::view::probes::{REPORT_PROBE_BARS, probe_bars};
use crate::view::server::build_server_card;

pub use png::{REPORT_HEIGHT, REPORT_WIDTH, render_png};

pub const REPORT_TITLE: &str = "PostgreSQL Dashboard Report";

/// Server card fields carried into the report.
const REPORT_SERVER_FIELDS: [&str; 4] = ["Size", "Connections", "Uptime", "Timezone"];

/// Error type for report export.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot load report font: {0}")]
    Font(String),
    #[error("cannot render report: {0}")]
    Render(String),
}

/// Everything drawn on the report, derived from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub title: String,
    pub database: String,
    pub generated_at: DateTime<Utc>,
    pub connection: CardViewModel,
    pub server: Section<CardViewModel>,
    pub tiles: Section<Vec<TileViewModel>>,
    /// First five successful probes, milliseconds.
    pub probe_bars: Section<Vec<BarPoint>>,
    /// Five largest tables, megabytes.
    pub table_bars: Section<Vec<BarPoint>>,
}

impl ReportData {
    pub fn from_snapshot(snapshot: &DashboardSnapshot, database: &str) -> Self {
        let server = build_server_card(snapshot.server.as_ref()).map(|mut card| {
            card.fields
                .retain(|(label, _)| REPORT_SERVER_FIELDS.contains(&label.as_str()));
            card
        });

        let probe_bars = if snapshot.probes.success_count() > 0 {
            Section::Available(probe_bars(&snapshot.probes, REPORT_PROBE_BARS))
        } else {
            Section::unavailable("Query probes")
        };

        let table_bars = match snapshot.tables.as_deref() {
            Some(tables) => Section::Available(table_size_bars(tables, REPORT_TABLE_BARS)),
            None => Section::unavailable("Table sizes"),
        };

        Self {
            title: REPORT_TITLE.to_string(),
            database: database.to_string(),
            generated_at: snapshot.taken_at,
            connection: build_connection_card(&snapshot.connection),
            server,
            tiles: build_metric_tiles(snapshot.performance.as_ref(), &MetricTile::REPORT),
            probe_bars,
            table_bars,
        }
    }
}

/// `pgdash_report_YYYYMMDD_HHMMSS.png`, local time.
pub fn report_file_name(generated_at: &DateTime<Utc>) -> String {
    format!(
        "pgdash_report_{}.png",
        generated_at.with_timezone(&Local).format("%Y%m%d_%H%M%S")
    )
}

/// Renders `data` into `dir` (created if missing) and returns the file path.
pub fn export(data: &ReportData, dir: &Path) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(&data.generated_at));
    render_png(data, &path)?;
    info!("Report written to {}", path.display());
    Ok(path)
}
