//! Collector for pg_stat_user_indexes.

use tracing::warn;

use super::queries::{INDEX_USAGE, TOP_N};
use super::{CollectError, PostgresCollector};
use crate::model::IndexUsageRow;

impl PostgresCollector {
    /// Top 20 indexes by scan count.
    pub fn fetch_index_usage(&self) -> Option<Vec<IndexUsageRow>> {
        match self.try_index_usage() {
            Ok(rows) => Some(rows),
            Err(e) => {
                warn!("index usage unavailable: {}", e);
                None
            }
        }
    }

    fn try_index_usage(&self) -> Result<Vec<IndexUsageRow>, CollectError> {
        let mut conn = self.acquire()?;
        let limit = TOP_N as i64;
        let rows = conn
            .query(INDEX_USAGE, &[&limit])
            .map_err(|e| CollectError::from_query(&e))?;

        let indexes = rows
            .iter()
            .map(|row| IndexUsageRow {
                schema: row.get("schemaname"),
                table_name: row.get("table_name"),
                index_name: row.get("index_name"),
                index_scans: row.get("index_scans"),
                tuples_read: row.get("tuples_read"),
                tuples_fetched: row.get("tuples_fetched"),
                index_size: row.get("index_size"),
                index_size_bytes: row.get("index_size_bytes"),
            })
            .collect();

        Ok(normalize_index_usage(indexes))
    }
}

/// Sorts by `index_scans` descending (stable), so never-scanned indexes end
/// up after every scanned one, and keeps at most 20 rows.
pub fn normalize_index_usage(mut rows: Vec<IndexUsageRow>) -> Vec<IndexUsageRow> {
    rows.sort_by(|a, b| b.index_scans.cmp(&a.index_scans));
    rows.truncate(TOP_N);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(name: &str, scans: i64) -> IndexUsageRow {
        IndexUsageRow {
            schema: "public".to_string(),
            table_name: "orders".to_string(),
            index_name: name.to_string(),
            index_scans: scans,
            ..Default::default()
        }
    }

    #[test]
    fn zero_scan_indexes_sort_last() {
        let rows = vec![
            index("idle_a", 0),
            index("hot", 900),
            index("idle_b", 0),
            index("warm", 12),
        ];
        let out = normalize_index_usage(rows);
        let names: Vec<&str> = out.iter().map(|i| i.index_name.as_str()).collect();
        assert_eq!(names, ["hot", "warm", "idle_a", "idle_b"]);
    }

    #[test]
    fn caps_at_twenty_and_is_non_increasing() {
        let rows: Vec<IndexUsageRow> = (0..45)
            .map(|i| index(&format!("idx{}", i), (i * 31) % 17))
            .collect();
        let out = normalize_index_usage(rows);
        assert_eq!(out.len(), 20);
        assert!(out.windows(2).all(|w| w[0].index_scans >= w[1].index_scans));
        let first_zero = out.iter().position(|i| i.index_scans == 0);
        if let Some(pos) = first_zero {
            assert!(out[pos..].iter().all(|i| i.index_scans == 0));
        }
    }
}
