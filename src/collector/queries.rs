//! Fixed SQL issued by the collector.
//!
//! Every statement is static; the only runtime inputs (schema name, row
//! limits) are bound parameters.

use crate::model::ProbeKind;

/// Schema whose tables are listed by size.
pub(super) const TABLE_SCHEMA: &str = "public";

/// Row cap for the table-size and index-usage lists.
pub const TOP_N: usize = 20;

pub(super) const SERVER_VERSION: &str = "SELECT version()";
pub(super) const SERVER_START_TIME: &str = "SELECT pg_postmaster_start_time()";
pub(super) const SERVER_NOW: &str = "SELECT now()";
pub(super) const SERVER_TIMEZONE: &str = "SELECT current_setting('timezone')";
pub(super) const DATABASE_SIZE: &str = "SELECT pg_database_size(current_database())";
pub(super) const ACTIVITY_COUNT: &str = "SELECT count(*) FROM pg_stat_activity";
pub(super) const MAX_CONNECTIONS: &str =
    "SELECT setting::int FROM pg_settings WHERE name = 'max_connections'";
/// `extract` returns numeric on PG 14+, hence the float8 cast.
pub(super) const UPTIME_SECONDS: &str =
    "SELECT extract(epoch FROM (now() - pg_postmaster_start_time()))::float8";

/// Lifetime counters of the current database.
pub(super) const STAT_DATABASE: &str = r#"
    SELECT
        COALESCE(xact_commit, 0)::bigint as xact_commit,
        COALESCE(xact_rollback, 0)::bigint as xact_rollback,
        COALESCE(blks_read, 0)::bigint as blks_read,
        COALESCE(blks_hit, 0)::bigint as blks_hit,
        COALESCE(temp_files, 0)::bigint as temp_files,
        COALESCE(temp_bytes, 0)::bigint as temp_bytes,
        COALESCE(deadlocks, 0)::bigint as deadlocks
    FROM pg_stat_database
    WHERE datname = current_database()
"#;

pub(super) const LOCK_COUNT: &str = "SELECT count(*) FROM pg_locks";

pub(super) const STAT_ACTIVITY: &str = r#"
    SELECT
        pid,
        usename::text as usename,
        COALESCE(application_name, '') as application_name,
        client_addr::text as client_addr,
        client_port,
        backend_start,
        query_start,
        state_change,
        state,
        COALESCE(query, '') as query
    FROM pg_stat_activity
    WHERE state IS NOT NULL
    ORDER BY backend_start DESC
"#;

/// `$1` schema name, `$2` row limit.
pub(super) const TABLE_SIZES: &str = r#"
    SELECT
        schemaname::text as schemaname,
        tablename::text as table_name,
        pg_size_pretty(pg_total_relation_size((quote_ident(schemaname) || '.' || quote_ident(tablename))::regclass)) as size_pretty,
        pg_total_relation_size((quote_ident(schemaname) || '.' || quote_ident(tablename))::regclass) as size_bytes
    FROM pg_tables
    WHERE schemaname = $1::text
    ORDER BY size_bytes DESC
    LIMIT $2
"#;

/// `$1` row limit. Never-scanned indexes (NULL or 0) sort last.
pub(super) const INDEX_USAGE: &str = r#"
    SELECT
        schemaname::text as schemaname,
        relname::text as table_name,
        indexrelname::text as index_name,
        COALESCE(idx_scan, 0)::bigint as index_scans,
        COALESCE(idx_tup_read, 0)::bigint as tuples_read,
        COALESCE(idx_tup_fetch, 0)::bigint as tuples_fetched,
        pg_size_pretty(pg_relation_size(indexrelid)) as index_size,
        pg_relation_size(indexrelid) as index_size_bytes
    FROM pg_stat_user_indexes
    ORDER BY COALESCE(idx_scan, 0) DESC
    LIMIT $1
"#;

/// SQL of one canonical probe.
pub(super) fn probe_sql(kind: ProbeKind) -> &'static str {
    match kind {
        ProbeKind::SimpleSelect => "SELECT 1",
        ProbeKind::CurrentTime => "SELECT now()",
        ProbeKind::DatabaseSize => "SELECT pg_database_size(current_database())",
        ProbeKind::ActiveConnections => "SELECT count(*) FROM pg_stat_activity",
        ProbeKind::TableCount => {
            "SELECT count(*) FROM information_schema.tables WHERE table_schema = 'public'"
        }
    }
}

/// Session setup run once on each newly opened pooled connection.
pub(super) fn statement_timeout_sql(timeout_ms: u128) -> String {
    format!("SET statement_timeout = {}", timeout_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_read_as_float8() {
        assert!(UPTIME_SECONDS.contains("pg_postmaster_start_time"));
        assert!(UPTIME_SECONDS.ends_with("::float8"));
    }

    #[test]
    fn table_sizes_query_binds_schema_and_limit() {
        assert!(TABLE_SIZES.contains("schemaname = $1::text"));
        assert!(TABLE_SIZES.contains("LIMIT $2"));
        assert!(!TABLE_SIZES.contains("'public'"));
        assert!(TABLE_SIZES.contains("pg_total_relation_size"));
    }

    #[test]
    fn index_usage_query_sorts_null_scans_as_zero() {
        assert!(INDEX_USAGE.contains("ORDER BY COALESCE(idx_scan, 0) DESC"));
        assert!(INDEX_USAGE.contains("LIMIT $1"));
    }

    #[test]
    fn activity_query_skips_sessions_without_state() {
        assert!(STAT_ACTIVITY.contains("WHERE state IS NOT NULL"));
        assert!(STAT_ACTIVITY.contains("ORDER BY backend_start DESC"));
    }

    #[test]
    fn every_probe_has_sql() {
        for kind in ProbeKind::all() {
            assert!(probe_sql(*kind).starts_with("SELECT"));
        }
        assert_eq!(probe_sql(ProbeKind::SimpleSelect), "SELECT 1");
    }

    #[test]
    fn statement_timeout_is_in_milliseconds() {
        assert_eq!(statement_timeout_sql(5000), "SET statement_timeout = 5000");
    }
}
