//! Timed connectivity check.

use std::time::Instant;

use tracing::debug;

use super::{PostgresCollector, database_name_of, format_postgres_error};
use crate::model::ConnectionStatus;

impl PostgresCollector {
    /// Dials a fresh, unpooled connection and times it.
    ///
    /// Latency runs from dial start until the connection is usable (startup
    /// and authentication done). The connection is closed right away. Never
    /// fails: every problem becomes `connected = false` with a message.
    pub fn probe_connectivity(&self) -> ConnectionStatus {
        let backend = match &self.backend {
            Ok(backend) => backend,
            Err(e) => return ConnectionStatus::down(e.to_string()),
        };

        let started = Instant::now();
        match backend.pg_config.connect(backend.tls.clone()) {
            Ok(client) => {
                let ping_ms = started.elapsed().as_secs_f64() * 1000.0;
                if let Err(e) = client.close() {
                    debug!("closing connectivity probe: {}", format_postgres_error(&e));
                }
                ConnectionStatus::up(ping_ms, database_name_of(&backend.pg_config))
            }
            Err(e) => {
                let msg = format_postgres_error(&e);
                debug!("connectivity probe failed: {}", msg);
                ConnectionStatus::down(msg)
            }
        }
    }
}
