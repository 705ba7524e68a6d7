//! End-to-end behaviour against a database that cannot be reached.

use std::time::Duration;

use pgdash::collector::PostgresCollector;
use pgdash::config::DbConfig;
use pgdash::provider::{LiveProvider, SnapshotProvider};
use pgdash::report::{self, ReportData};
use pgdash::view::DashboardView;

fn unreachable_config() -> DbConfig {
    DbConfig::new("host=127.0.0.1 port=1 user=nobody dbname=nowhere sslmode=disable")
        .with_connect_timeout(Duration::from_millis(300))
        .with_acquire_timeout(Duration::from_millis(300))
}

#[test]
fn every_operation_degrades_without_panicking() {
    let collector = PostgresCollector::new(unreachable_config());

    let status = collector.probe_connectivity();
    assert!(!status.connected);
    assert!(status.error.as_deref().is_some_and(|e| !e.is_empty()));

    assert!(collector.fetch_server_info().is_none());
    assert!(collector.fetch_performance_metrics().is_none());
    assert!(collector.fetch_active_sessions().is_none());
    assert!(collector.fetch_table_sizes().is_none());
    assert!(collector.fetch_index_usage().is_none());

    let probes = collector.run_probes();
    assert_eq!(probes.len(), 5);
    assert_eq!(probes.success_count(), 0);
}

#[test]
fn malformed_connection_strings_report_disconnected() {
    for dsn in ["host=db port=99999", "postgres://user@host:notaport/db", ""] {
        let collector = PostgresCollector::new(
            DbConfig::new(dsn).with_connect_timeout(Duration::from_millis(300)),
        );
        let status = collector.probe_connectivity();
        assert!(!status.connected, "{dsn:?} should not connect");
        assert!(status.error.is_some(), "{dsn:?} should carry an error");
    }
}

#[test]
fn provider_retries_every_cycle() {
    let mut provider = LiveProvider::new(unreachable_config());

    let first = provider.advance().clone();
    assert!(!first.connection.connected);
    assert_eq!(first.available_sections(), 0);

    provider.rebuild();
    assert!(!provider.is_initialized());

    let second = provider.advance();
    assert!(!second.connection.connected);
    assert!(second.taken_at >= first.taken_at);
    assert_eq!(provider.cycles(), 2);

    let view = DashboardView::build(provider.current().unwrap());
    assert!(!view.server.is_available());
    assert!(!view.sessions.is_available());
}

#[test]
fn report_of_unreachable_database_is_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut provider = LiveProvider::new(unreachable_config());
    let snapshot = provider.fresh_snapshot();

    let data = ReportData::from_snapshot(&snapshot, &provider.database_label());
    let path = report::export(&data, dir.path()).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("pgdash_report_"), "{name}");
    assert!(name.ends_with(".png"), "{name}");

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
