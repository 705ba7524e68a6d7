//! Provider abstraction for snapshot data sources.
//!
//! The TUI, the headless loop and the report exporter all pull snapshots
//! through `SnapshotProvider`, so rendering can be tested against canned data
//! without a database.

mod live;

pub use live::LiveProvider;

use crate::model::DashboardSnapshot;

/// Source of dashboard snapshots.
pub trait SnapshotProvider {
    /// Snapshot of the last refresh cycle, `None` before the first one.
    fn current(&self) -> Option<&DashboardSnapshot>;

    /// Runs one refresh cycle and makes its result current.
    fn advance(&mut self) -> &DashboardSnapshot;

    /// Collects a snapshot without touching `current()`.
    ///
    /// Used by the report so the export reflects the database at export time,
    /// not the last rendered frame.
    fn fresh_snapshot(&mut self) -> DashboardSnapshot;

    /// Drops the underlying collector (and its connections); the next cycle
    /// starts from scratch.
    fn rebuild(&mut self) {}

    /// Label of the monitored database for headers and logs.
    fn database_label(&self) -> String;

    /// Number of completed refresh cycles.
    fn cycles(&self) -> u64;
}
