//! Live data provider backed by a PostgreSQL collector.

use tracing::{debug, info};

use crate::collector::{PostgresCollector, describe_dsn};
use crate::config::DbConfig;
use crate::model::DashboardSnapshot;

use super::SnapshotProvider;

/// Provider collecting from a live database.
///
/// Owns the process-wide collector: it is built on first use, reused for every
/// cycle and rebuilt only when [`SnapshotProvider::rebuild`] is called.
pub struct LiveProvider {
    config: DbConfig,
    collector: Option<PostgresCollector>,
    current: Option<DashboardSnapshot>,
    cycles: u64,
}

impl LiveProvider {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            collector: None,
            current: None,
            cycles: 0,
        }
    }

    fn collector(&mut self) -> &PostgresCollector {
        let config = &self.config;
        self.collector.get_or_insert_with(|| {
            let collector = PostgresCollector::new(config.clone());
            info!("PostgreSQL collector: target {}", collector.target_label());
            collector
        })
    }

    /// Whether a collector is currently built.
    pub fn is_initialized(&self) -> bool {
        self.collector.is_some()
    }
}

impl SnapshotProvider for LiveProvider {
    fn current(&self) -> Option<&DashboardSnapshot> {
        self.current.as_ref()
    }

    fn advance(&mut self) -> &DashboardSnapshot {
        let snapshot = self.collector().collect_snapshot();
        self.cycles += 1;
        self.current.insert(snapshot)
    }

    fn fresh_snapshot(&mut self) -> DashboardSnapshot {
        self.collector().collect_snapshot()
    }

    fn rebuild(&mut self) {
        if self.collector.take().is_some() {
            debug!("PostgreSQL collector dropped, rebuilding on next cycle");
        }
    }

    fn database_label(&self) -> String {
        match &self.collector {
            Some(collector) => collector.target_label(),
            None => describe_dsn(&self.config.dsn),
        }
    }

    fn cycles(&self) -> u64 {
        self.cycles
    }
}
