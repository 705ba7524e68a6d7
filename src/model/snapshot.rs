//! One refresh cycle's worth of collector output.

use chrono::{DateTime, Utc};

use super::postgres::{
    ConnectionRow, ConnectionStatus, DatabaseInfo, IndexUsageRow, PerformanceMetrics,
    QueryProbeResult, TableSizeRow,
};

/// Everything the presenter needs for one render pass.
///
/// `None` marks a section whose collection failed; the presenter shows an
/// unavailable placeholder for it and renders the rest as usual.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSnapshot {
    /// Wall-clock time the cycle started.
    pub taken_at: DateTime<Utc>,
    pub connection: ConnectionStatus,
    pub server: Option<DatabaseInfo>,
    pub performance: Option<PerformanceMetrics>,
    pub probes: QueryProbeResult,
    pub sessions: Option<Vec<ConnectionRow>>,
    pub tables: Option<Vec<TableSizeRow>>,
    pub indexes: Option<Vec<IndexUsageRow>>,
}

impl DashboardSnapshot {
    /// Snapshot for a database that could not be reached at all.
    pub fn unreachable(taken_at: DateTime<Utc>, error: &str) -> Self {
        Self {
            taken_at,
            connection: ConnectionStatus::down(error),
            server: None,
            performance: None,
            probes: QueryProbeResult::all_failed(error),
            sessions: None,
            tables: None,
            indexes: None,
        }
    }

    /// Number of sections (out of six data sections) that came back.
    pub fn available_sections(&self) -> usize {
        [
            self.server.is_some(),
            self.performance.is_some(),
            self.probes.success_count() > 0,
            self.sessions.is_some(),
            self.tables.is_some(),
            self.indexes.is_some(),
        ]
        .iter()
        .filter(|v| **v)
        .count()
    }
}
