//! Server identity and capacity (`version()`, `pg_settings`, sizes).

use postgres::Client;
use tracing::warn;

use super::queries::{
    ACTIVITY_COUNT, DATABASE_SIZE, MAX_CONNECTIONS, SERVER_NOW, SERVER_START_TIME,
    SERVER_TIMEZONE, SERVER_VERSION, UPTIME_SECONDS,
};
use super::{CollectError, PostgresCollector, query_scalar};
use crate::model::DatabaseInfo;

impl PostgresCollector {
    /// Server info, or `None` if any of the scalar queries fails.
    pub fn fetch_server_info(&self) -> Option<DatabaseInfo> {
        match self.try_server_info() {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("server info unavailable: {}", e);
                None
            }
        }
    }

    fn try_server_info(&self) -> Result<DatabaseInfo, CollectError> {
        let mut conn = self.acquire()?;
        read_server_info(&mut conn)
    }
}

/// Runs the fixed scalar sequence in order; the first failure aborts it.
fn read_server_info(client: &mut Client) -> Result<DatabaseInfo, CollectError> {
    let version = query_scalar(client, SERVER_VERSION, &[])?;
    let server_start_time = query_scalar(client, SERVER_START_TIME, &[])?;
    let current_time = query_scalar(client, SERVER_NOW, &[])?;
    let timezone = query_scalar(client, SERVER_TIMEZONE, &[])?;
    let database_size_bytes = query_scalar(client, DATABASE_SIZE, &[])?;
    let active_connections = query_scalar(client, ACTIVITY_COUNT, &[])?;
    let max_connections = query_scalar(client, MAX_CONNECTIONS, &[])?;
    let uptime_seconds = query_scalar(client, UPTIME_SECONDS, &[])?;

    Ok(DatabaseInfo {
        version,
        server_start_time,
        current_time,
        timezone,
        database_size_bytes,
        active_connections,
        max_connections,
        uptime_seconds,
    })
}
