//! Data model shared by the collector and the presenter.

pub mod postgres;
pub mod snapshot;

pub use postgres::{
    ConnectionRow, ConnectionStatus, DatabaseInfo, IndexUsageRow, PerformanceMetrics, ProbeKind,
    ProbeOutcome, QueryProbeResult, TableSizeRow,
};
pub use snapshot::DashboardSnapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_status_down_never_carries_ping_or_name() {
        let status = ConnectionStatus::down("password authentication failed");
        assert!(!status.connected);
        assert!(status.ping_ms.is_none());
        assert!(status.database_name.is_none());
        assert_eq!(
            status.error.as_deref(),
            Some("password authentication failed")
        );
    }

    #[test]
    fn connection_status_down_replaces_blank_error() {
        let status = ConnectionStatus::down("   ");
        assert_eq!(status.error.as_deref(), Some("connection failed"));
    }

    #[test]
    fn connection_status_up_has_no_error() {
        let status = ConnectionStatus::up(12.5, Some("app".to_string()));
        assert!(status.connected);
        assert_eq!(status.ping_ms, Some(12.5));
        assert!(status.error.is_none());
    }

    #[test]
    fn probe_result_keeps_canonical_order() {
        let result = QueryProbeResult::from_fn(|k| match k {
            ProbeKind::TableCount => ProbeOutcome::failed("permission denied"),
            _ => ProbeOutcome::succeeded(0.001),
        });

        let names: Vec<&str> = result.iter().map(|(k, _)| k.name()).collect();
        assert_eq!(
            names,
            [
                "Simple SELECT",
                "Current Time",
                "Database Size",
                "Active Connections",
                "Table Count"
            ]
        );
        assert_eq!(result.success_count(), 4);
        let failed = result.by_name("Table Count").unwrap();
        assert!(!failed.success);
        assert!(failed.execution_time_seconds.is_none());
    }

    #[test]
    fn probe_outcome_reports_milliseconds() {
        let outcome = ProbeOutcome::succeeded(0.0125);
        let ms = outcome.execution_time_ms().unwrap();
        assert!((ms - 12.5).abs() < 1e-9);
        assert!(ProbeOutcome::failed("x").execution_time_ms().is_none());
    }
}
