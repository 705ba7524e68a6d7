//! PostgreSQL collector.
//!
//! Issues the fixed introspection queries of the dashboard against one
//! database:
//! - connectivity: a fresh, timed dial (not pooled)
//! - `version()`, `pg_settings`, `pg_database_size()` and friends: server info
//! - `pg_stat_database`, `pg_locks`: performance counters
//! - five canonical latency probes
//! - `pg_stat_activity`: live sessions
//! - `pg_tables` + `pg_total_relation_size()`: largest tables
//! - `pg_stat_user_indexes`: index usage
//!
//! Everything except the connectivity check runs on a small r2d2 pool. Each
//! operation holds one pooled connection for the duration of the call.
//! Public operations never return errors: failures are logged and turned into
//! `None` (or a failed status / failed probe entries).

mod connectivity;
mod indexes;
mod performance;
mod probes;
pub mod queries;
mod server_info;
mod sessions;
mod tables;

use std::str::FromStr;

use chrono::Utc;
use postgres::error::SqlState;
use postgres::types::{FromSqlOwned, ToSql};
use postgres::{Client, Config};
use postgres_native_tls::MakeTlsConnector;
use r2d2::{CustomizeConnection, HandleError, Pool, PooledConnection};
use r2d2_postgres::PostgresConnectionManager;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{APPLICATION_NAME, DbConfig};
use crate::model::DashboardSnapshot;

pub use indexes::normalize_index_usage;
pub use performance::{cache_hit_ratio, cumulative_share};
pub use sessions::normalize_sessions;
pub use tables::normalize_table_sizes;

type Manager = PostgresConnectionManager<MakeTlsConnector>;

const INVALID_SETTINGS_LABEL: &str = "(invalid connection settings)";

/// Error type for PostgreSQL collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectError {
    /// Connection string could not be parsed.
    #[error("{0}")]
    InvalidConfig(String),
    /// Dial, authentication, TLS, network or pool acquisition failure.
    #[error("{0}")]
    Connection(String),
    /// Query execution failed.
    #[error("query error: {0}")]
    Query(String),
    /// Statement cancelled by `statement_timeout`.
    #[error("query timed out: {0}")]
    Timeout(String),
    /// A scalar query returned no row.
    #[error("no row returned by `{0}`")]
    MissingRow(&'static str),
}

impl CollectError {
    /// Classifies a driver error raised while running a statement.
    pub(crate) fn from_query(e: &postgres::Error) -> Self {
        if e.code() == Some(&SqlState::QUERY_CANCELED) {
            CollectError::Timeout(format_postgres_error(e))
        } else if e.is_closed() {
            CollectError::Connection(format_postgres_error(e))
        } else {
            CollectError::Query(format_postgres_error(e))
        }
    }
}

/// Parsed settings plus the pool built from them.
struct Backend {
    pg_config: Config,
    tls: MakeTlsConnector,
    pool: Pool<Manager>,
}

/// PostgreSQL metrics collector.
///
/// Construction never fails. A connection string the driver rejects (or a
/// TLS connector that cannot be built) is recorded, and every operation
/// reports that error as its failure.
pub struct PostgresCollector {
    config: DbConfig,
    backend: Result<Backend, CollectError>,
}

impl PostgresCollector {
    pub fn new(config: DbConfig) -> Self {
        let backend = build_backend(&config);
        if let Err(e) = &backend {
            warn!("PostgreSQL collector: {}", e);
        }
        Self { config, backend }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Error recorded at construction time, if any.
    pub fn setup_error(&self) -> Option<&CollectError> {
        self.backend.as_ref().err()
    }

    /// Database named by the connection settings (libpq falls back to the
    /// user name when no database is given).
    pub fn database_name(&self) -> Option<String> {
        let config = &self.backend.as_ref().ok()?.pg_config;
        database_name_of(config)
    }

    /// Short `database@host:port` label for headers and logs.
    pub fn target_label(&self) -> String {
        match &self.backend {
            Ok(backend) => describe_target(&backend.pg_config),
            Err(_) => INVALID_SETTINGS_LABEL.to_string(),
        }
    }

    /// Runs one refresh cycle: every operation, strictly in order.
    ///
    /// When the fresh dial fails and the pool holds no idle connection, the
    /// pooled sections are reported unavailable with the dial error instead of
    /// each one waiting for the acquisition timeout.
    pub fn collect_snapshot(&self) -> DashboardSnapshot {
        let taken_at = Utc::now();
        let connection = self.probe_connectivity();

        if !connection.connected && self.idle_connections() == 0 {
            let error = connection
                .error
                .clone()
                .unwrap_or_else(|| "connection failed".to_string());
            debug!("skipping pooled sections: {}", error);
            return DashboardSnapshot::unreachable(taken_at, &error);
        }

        let server = self.fetch_server_info();
        let performance = self.fetch_performance_metrics();
        let probes = self.run_probes();
        let sessions = self.fetch_active_sessions();
        let tables = self.fetch_table_sizes();
        let indexes = self.fetch_index_usage();

        DashboardSnapshot {
            taken_at,
            connection,
            server,
            performance,
            probes,
            sessions,
            tables,
            indexes,
        }
    }

    fn idle_connections(&self) -> u32 {
        self.backend
            .as_ref()
            .map(|b| b.pool.state().idle_connections)
            .unwrap_or(0)
    }

    /// Checks out one pooled connection. Returned to the pool on drop.
    pub(crate) fn acquire(&self) -> Result<PooledConnection<Manager>, CollectError> {
        let backend = self.backend.as_ref().map_err(Clone::clone)?;
        backend
            .pool
            .get()
            .map_err(|e| CollectError::Connection(e.to_string()))
    }
}

fn build_backend(config: &DbConfig) -> Result<Backend, CollectError> {
    let mut pg_config = Config::from_str(&config.dsn)
        .map_err(|e| CollectError::InvalidConfig(error_chain(&e)))?;
    pg_config.connect_timeout(config.connect_timeout);
    if pg_config.get_application_name().is_none() {
        pg_config.application_name(APPLICATION_NAME);
    }

    let connector = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
        .map_err(|e| CollectError::Connection(format!("TLS setup failed: {}", e)))?;
    let tls = MakeTlsConnector::new(connector);

    let manager = PostgresConnectionManager::new(pg_config.clone(), tls.clone());
    let pool = Pool::builder()
        .max_size(config.pool_size.max(1))
        .min_idle(Some(0))
        .connection_timeout(config.acquire_timeout)
        .error_handler(Box::new(TracingErrorHandler))
        .connection_customizer(Box::new(StatementTimeout {
            timeout_ms: config.statement_timeout.as_millis(),
        }))
        .build_unchecked(manager);

    Ok(Backend {
        pg_config,
        tls,
        pool,
    })
}

/// Sets the server-side `statement_timeout` once on each newly opened
/// pooled connection.
#[derive(Debug)]
struct StatementTimeout {
    timeout_ms: u128,
}

impl CustomizeConnection<Client, postgres::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut Client) -> Result<(), postgres::Error> {
        conn.batch_execute(&queries::statement_timeout_sql(self.timeout_ms))
    }
}

/// Routes background pool errors to tracing.
#[derive(Debug)]
struct TracingErrorHandler;

impl HandleError<postgres::Error> for TracingErrorHandler {
    fn handle_error(&self, error: postgres::Error) {
        debug!("pool connection attempt failed: {}", format_postgres_error(&error));
    }
}

/// Runs a single-row, single-column query.
pub(crate) fn query_scalar<T: FromSqlOwned>(
    client: &mut Client,
    sql: &'static str,
    params: &[&(dyn ToSql + Sync)],
) -> Result<T, CollectError> {
    let row = client
        .query_opt(sql, params)
        .map_err(|e| CollectError::from_query(&e))?
        .ok_or(CollectError::MissingRow(sql))?;
    row.try_get(0).map_err(|e| CollectError::from_query(&e))
}

/// `database@host:port` label straight from connection settings, without
/// building a collector.
pub fn describe_dsn(dsn: &str) -> String {
    match Config::from_str(dsn) {
        Ok(config) => describe_target(&config),
        Err(_) => INVALID_SETTINGS_LABEL.to_string(),
    }
}

fn database_name_of(config: &Config) -> Option<String> {
    config
        .get_dbname()
        .or_else(|| config.get_user())
        .map(str::to_string)
}

fn describe_target(config: &Config) -> String {
    let database = database_name_of(config).unwrap_or_else(|| "?".to_string());
    let host = match config.get_hosts().first() {
        Some(postgres::config::Host::Tcp(host)) => host.clone(),
        Some(_) => "local socket".to_string(),
        None => "localhost".to_string(),
    };
    match config.get_ports().first() {
        Some(port) => format!("{}@{}:{}", database, host, port),
        None => format!("{}@{}", database, host),
    }
}

/// Formats PostgreSQL error message for display.
///
/// Server errors show severity and message. Client-side errors (dial, DNS,
/// TLS, config parsing) only name their kind in `Display`, so the `source()`
/// chain is appended.
pub(crate) fn format_postgres_error(e: &postgres::Error) -> String {
    match e.as_db_error() {
        Some(db_error) => format!("{}: {}", db_error.severity(), db_error.message()),
        None => error_chain(e),
    }
}

/// `Display` of `e` followed by each cause, `": "`-separated. Causes already
/// contained in the text are not repeated.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !msg.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }
    msg
}
