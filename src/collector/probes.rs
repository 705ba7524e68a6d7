//! Canonical latency probes.

use std::time::Instant;

use postgres::Client;
use tracing::warn;

use super::queries::probe_sql;
use super::{CollectError, PostgresCollector};
use crate::model::{ProbeOutcome, QueryProbeResult};

impl PostgresCollector {
    /// Runs the five probes in order on one pooled connection.
    ///
    /// Always returns five entries. A failing probe does not stop the rest;
    /// if no connection can be acquired every entry carries that error.
    pub fn run_probes(&self) -> QueryProbeResult {
        match self.acquire() {
            Ok(mut conn) => run_probes_on(&mut conn),
            Err(e) => {
                warn!("query probes skipped: {}", e);
                QueryProbeResult::all_failed(&e.to_string())
            }
        }
    }
}

fn run_probes_on(client: &mut Client) -> QueryProbeResult {
    QueryProbeResult::from_fn(|kind| {
        let started = Instant::now();
        match client.query(probe_sql(kind), &[]) {
            Ok(_rows) => ProbeOutcome::succeeded(started.elapsed().as_secs_f64()),
            Err(e) => {
                let e = CollectError::from_query(&e);
                warn!("probe '{}' failed: {}", kind.name(), e);
                ProbeOutcome::failed(e.to_string())
            }
        }
    })
}
