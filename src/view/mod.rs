//! UI-agnostic view models.
//!
//! Each sub-module turns one snapshot section into a view model, or into an
//! "unavailable" placeholder when the collector reported absence. The TUI and
//! the PNG report render the same models.

pub mod common;
pub mod connection;
pub mod metrics;
pub mod objects;
pub mod probes;
pub mod server;
pub mod sessions;

use common::{CardViewModel, Section, TableViewModel, TileViewModel};
use metrics::MetricTile;
use probes::ProbesViewModel;
use sessions::SessionsViewModel;

use crate::model::DashboardSnapshot;

/// Every dashboard section of one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub connection: CardViewModel,
    pub server: Section<CardViewModel>,
    pub tiles: Section<Vec<TileViewModel>>,
    pub probes: Section<ProbesViewModel>,
    pub sessions: Section<SessionsViewModel>,
    pub tables: Section<TableViewModel<String>>,
    pub indexes: Section<TableViewModel<String>>,
}

impl DashboardView {
    pub fn build(snapshot: &DashboardSnapshot) -> Self {
        Self {
            connection: connection::build_connection_card(&snapshot.connection),
            server: server::build_server_card(snapshot.server.as_ref()),
            tiles: metrics::build_metric_tiles(
                snapshot.performance.as_ref(),
                &MetricTile::DASHBOARD,
            ),
            probes: probes::build_probes(&snapshot.probes),
            sessions: sessions::build_sessions(snapshot.sessions.as_deref(), &snapshot.taken_at),
            tables: objects::build_table_sizes(
                snapshot.tables.as_deref(),
                objects::DASHBOARD_OBJECT_ROWS,
            ),
            indexes: objects::build_index_usage(
                snapshot.indexes.as_deref(),
                objects::DASHBOARD_OBJECT_ROWS,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn unreachable_snapshot_turns_every_section_into_placeholder() {
        let snap = DashboardSnapshot::unreachable(Utc::now(), "connection refused");
        let view = DashboardView::build(&snap);
        assert_eq!(
            view.connection.headline.as_ref().unwrap().text,
            connection::DISCONNECTED
        );
        assert!(!view.server.is_available());
        assert!(!view.tiles.is_available());
        assert!(!view.probes.is_available());
        assert!(!view.sessions.is_available());
        assert!(!view.tables.is_available());
        assert!(!view.indexes.is_available());
    }
}
