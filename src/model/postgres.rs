//! PostgreSQL entities produced by the collector.
//!
//! Every value here is an instantaneous reading. Nothing is kept between
//! refresh cycles; each cycle builds these structures from scratch.

use chrono::{DateTime, Utc};

/// Result of dialing the database once and timing it.
///
/// Build it through [`ConnectionStatus::up`] or [`ConnectionStatus::down`]:
/// a failed dial never carries a ping or a database name, and a successful
/// one never carries an error.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionStatus {
    pub connected: bool,
    /// Dial latency in milliseconds, measured from dial start until the
    /// connection is usable.
    pub ping_ms: Option<f64>,
    /// Database named in the connection configuration.
    pub database_name: Option<String>,
    pub error: Option<String>,
}

impl ConnectionStatus {
    pub fn up(ping_ms: f64, database_name: Option<String>) -> Self {
        Self {
            connected: true,
            ping_ms: Some(ping_ms),
            database_name,
            error: None,
        }
    }

    /// An empty message is replaced so the error is never blank.
    pub fn down(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "connection failed".to_string()
        } else {
            error
        };
        Self {
            connected: false,
            ping_ms: None,
            database_name: None,
            error: Some(error),
        }
    }
}

/// Server identity and capacity.
///
/// Produced all-or-nothing: if any of the underlying scalar queries fails the
/// whole value is absent.
#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseInfo {
    /// Source: `version()`
    pub version: String,
    /// Source: `pg_postmaster_start_time()`
    pub server_start_time: DateTime<Utc>,
    /// Source: `now()`
    pub current_time: DateTime<Utc>,
    /// Source: `current_setting('timezone')`
    pub timezone: String,
    /// Source: `pg_database_size(current_database())`
    pub database_size_bytes: i64,
    /// Source: `count(*) FROM pg_stat_activity`
    pub active_connections: i64,
    /// Source: `pg_settings.setting WHERE name = 'max_connections'`
    pub max_connections: i32,
    /// Source: `now() - pg_postmaster_start_time()` in seconds
    pub uptime_seconds: f64,
}

/// Performance counters of the current database.
///
/// `commits_ratio`, `rollbacks_ratio` and `blocks_read_ratio` are fractions
/// of lifetime totals from `pg_stat_database`, not per-second rates.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceMetrics {
    /// `100 * blks_hit / (blks_hit + blks_read)`, two decimals, 0 when idle.
    pub cache_hit_ratio_pct: f64,
    /// `xact_commit / max(1, xact_commit + xact_rollback)`
    pub commits_ratio: f64,
    /// `xact_rollback / max(1, xact_commit + xact_rollback)`
    pub rollbacks_ratio: f64,
    /// `blks_read / max(1, blks_read + blks_hit)`
    pub blocks_read_ratio: f64,
    /// Live row count of `pg_locks`.
    pub lock_count: i64,
    /// Source: `pg_stat_database.deadlocks`
    pub deadlock_count: i64,
    /// Source: `pg_stat_database.temp_files`
    pub temp_file_count: i64,
    /// Source: `pg_stat_database.temp_bytes`
    pub temp_bytes: i64,
}

/// The five canonical diagnostic queries, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    SimpleSelect,
    CurrentTime,
    DatabaseSize,
    ActiveConnections,
    TableCount,
}

impl ProbeKind {
    pub fn all() -> &'static [ProbeKind] {
        &[
            ProbeKind::SimpleSelect,
            ProbeKind::CurrentTime,
            ProbeKind::DatabaseSize,
            ProbeKind::ActiveConnections,
            ProbeKind::TableCount,
        ]
    }

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            ProbeKind::SimpleSelect => "Simple SELECT",
            ProbeKind::CurrentTime => "Current Time",
            ProbeKind::DatabaseSize => "Database Size",
            ProbeKind::ActiveConnections => "Active Connections",
            ProbeKind::TableCount => "Table Count",
        }
    }

    pub fn from_name(name: &str) -> Option<ProbeKind> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// Outcome of a single probe.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeOutcome {
    pub success: bool,
    /// Seconds from just before execution until all rows were fetched.
    pub execution_time_seconds: Option<f64>,
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn succeeded(execution_time_seconds: f64) -> Self {
        Self {
            success: true,
            execution_time_seconds: Some(execution_time_seconds),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            execution_time_seconds: None,
            error: Some(error.into()),
        }
    }

    /// Execution time in milliseconds, successful probes only.
    pub fn execution_time_ms(&self) -> Option<f64> {
        self.execution_time_seconds.map(|s| s * 1000.0)
    }
}

/// One outcome per [`ProbeKind`], always all five, in canonical order.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryProbeResult {
    entries: Vec<(ProbeKind, ProbeOutcome)>,
}

impl QueryProbeResult {
    /// Builds a result by running `run` once per probe kind, in order.
    pub fn from_fn(mut run: impl FnMut(ProbeKind) -> ProbeOutcome) -> Self {
        Self {
            entries: ProbeKind::all().iter().map(|&k| (k, run(k))).collect(),
        }
    }

    /// Every probe failed with the same message (e.g. no connection).
    pub fn all_failed(error: &str) -> Self {
        Self::from_fn(|_| ProbeOutcome::failed(error))
    }

    pub fn get(&self, kind: ProbeKind) -> Option<&ProbeOutcome> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|(_, o)| o)
    }

    pub fn by_name(&self, name: &str) -> Option<&ProbeOutcome> {
        ProbeKind::from_name(name).and_then(|k| self.get(k))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProbeKind, &ProbeOutcome)> {
        self.entries.iter().map(|(k, o)| (*k, o))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.success).count()
    }
}

/// One live backend session.
///
/// Source: `pg_stat_activity WHERE state IS NOT NULL`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ConnectionRow {
    pub pid: i32,
    /// Source: `usename` (NULL for background workers)
    pub username: Option<String>,
    pub application_name: String,
    /// Source: `client_addr::text` (NULL for unix sockets)
    pub client_address: Option<String>,
    pub client_port: Option<i32>,
    pub backend_start: Option<DateTime<Utc>>,
    pub query_start: Option<DateTime<Utc>>,
    pub state_change: Option<DateTime<Utc>>,
    pub state: String,
    pub query_text: String,
}

/// Table footprint, data + indexes + TOAST.
///
/// Source: `pg_tables` joined with `pg_total_relation_size()`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TableSizeRow {
    pub schema: String,
    pub table_name: String,
    /// Source: `pg_size_pretty(pg_total_relation_size(...))`
    pub size_pretty: String,
    pub size_bytes: i64,
}

/// Index usage statistics.
///
/// Source: `pg_stat_user_indexes`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct IndexUsageRow {
    pub schema: String,
    pub table_name: String,
    pub index_name: String,
    /// Source: `idx_scan`
    pub index_scans: i64,
    /// Source: `idx_tup_read`
    pub tuples_read: i64,
    /// Source: `idx_tup_fetch`
    pub tuples_fetched: i64,
    /// Source: `pg_size_pretty(pg_relation_size(indexrelid))`
    pub index_size: String,
    pub index_size_bytes: i64,
}
