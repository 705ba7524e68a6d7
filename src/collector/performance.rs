//! Collector for `pg_stat_database` counters and the live lock count.

use tracing::warn;

use super::queries::{LOCK_COUNT, STAT_DATABASE};
use super::{CollectError, PostgresCollector, query_scalar};
use crate::model::PerformanceMetrics;

impl PostgresCollector {
    /// Performance counters of the current database, all-or-nothing.
    pub fn fetch_performance_metrics(&self) -> Option<PerformanceMetrics> {
        match self.try_performance_metrics() {
            Ok(metrics) => Some(metrics),
            Err(e) => {
                warn!("performance metrics unavailable: {}", e);
                None
            }
        }
    }

    fn try_performance_metrics(&self) -> Result<PerformanceMetrics, CollectError> {
        let mut conn = self.acquire()?;

        let row = conn
            .query_opt(STAT_DATABASE, &[])
            .map_err(|e| CollectError::from_query(&e))?
            .ok_or(CollectError::MissingRow(STAT_DATABASE))?;
        let get = |idx: usize| -> Result<i64, CollectError> {
            row.try_get(idx).map_err(|e| CollectError::from_query(&e))
        };
        let xact_commit = get(0)?;
        let xact_rollback = get(1)?;
        let blks_read = get(2)?;
        let blks_hit = get(3)?;
        let temp_file_count = get(4)?;
        let temp_bytes = get(5)?;
        let deadlock_count = get(6)?;

        let lock_count: i64 = query_scalar(&mut conn, LOCK_COUNT, &[])?;

        Ok(PerformanceMetrics {
            cache_hit_ratio_pct: cache_hit_ratio(blks_hit, blks_read),
            commits_ratio: cumulative_share(xact_commit, xact_rollback),
            rollbacks_ratio: cumulative_share(xact_rollback, xact_commit),
            blocks_read_ratio: cumulative_share(blks_read, blks_hit),
            lock_count,
            deadlock_count,
            temp_file_count,
            temp_bytes,
        })
    }
}

/// `100 * hits / (hits + reads)` rounded to two decimals; 0 when both are 0.
pub fn cache_hit_ratio(hits: i64, reads: i64) -> f64 {
    let total = hits.saturating_add(reads);
    if total <= 0 {
        return 0.0;
    }
    let pct = hits as f64 * 100.0 / total as f64;
    (pct * 100.0).round() / 100.0
}

/// `part / max(1, part + other)`: share of `part` in a lifetime total.
///
/// In `[0, 1]` whenever both inputs are non-negative.
pub fn cumulative_share(part: i64, other: i64) -> f64 {
    let total = part.saturating_add(other).max(1);
    part as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_hit_ratio_is_zero_when_idle() {
        assert_eq!(cache_hit_ratio(0, 0), 0.0);
    }

    #[test]
    fn cache_hit_ratio_rounds_to_two_decimals() {
        assert_eq!(cache_hit_ratio(990, 10), 99.0);
        assert_eq!(cache_hit_ratio(2, 1), 66.67);
        assert_eq!(cache_hit_ratio(0, 50), 0.0);
        assert_eq!(cache_hit_ratio(50, 0), 100.0);
    }

    #[test]
    fn cumulative_share_keeps_max_one_guard() {
        assert_eq!(cumulative_share(0, 0), 0.0);
        assert_eq!(cumulative_share(3, 1), 0.75);
        assert_eq!(cumulative_share(1, 3), 0.25);
        assert_eq!(cumulative_share(1, 0), 1.0);
    }

    #[test]
    fn cumulative_share_stays_in_unit_interval() {
        let values = [0_i64, 1, 2, 7, 100, 12_345, 9_999_999, i64::MAX / 4];
        for &a in &values {
            for &b in &values {
                let share = cumulative_share(a, b);
                assert!((0.0..=1.0).contains(&share), "share({a}, {b}) = {share}");
            }
        }
    }
}
