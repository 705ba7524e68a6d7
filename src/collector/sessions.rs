//! Collector for `pg_stat_activity`.

use tracing::warn;

use super::queries::STAT_ACTIVITY;
use super::{CollectError, PostgresCollector};
use crate::model::ConnectionRow;

impl PostgresCollector {
    /// Sessions with a non-null state, newest backend first.
    pub fn fetch_active_sessions(&self) -> Option<Vec<ConnectionRow>> {
        match self.try_active_sessions() {
            Ok(rows) => Some(rows),
            Err(e) => {
                warn!("active sessions unavailable: {}", e);
                None
            }
        }
    }

    fn try_active_sessions(&self) -> Result<Vec<ConnectionRow>, CollectError> {
        let mut conn = self.acquire()?;
        let rows = conn
            .query(STAT_ACTIVITY, &[])
            .map_err(|e| CollectError::from_query(&e))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            sessions.push(ConnectionRow {
                pid: row.try_get("pid").map_err(|e| CollectError::from_query(&e))?,
                username: row.get("usename"),
                application_name: row.get("application_name"),
                client_address: row.get("client_addr"),
                client_port: row.get("client_port"),
                backend_start: row.get("backend_start"),
                query_start: row.get("query_start"),
                state_change: row.get("state_change"),
                state: row.get("state"),
                query_text: row.get("query"),
            });
        }

        Ok(normalize_sessions(sessions))
    }
}

/// Orders sessions by `backend_start` descending; sessions without a start
/// time go last. Stable for equal start times.
pub fn normalize_sessions(mut rows: Vec<ConnectionRow>) -> Vec<ConnectionRow> {
    rows.sort_by(|a, b| b.backend_start.cmp(&a.backend_start));
    rows
}
