//! Collector for the largest tables of the `public` schema.

use tracing::warn;

use super::queries::{TABLE_SCHEMA, TABLE_SIZES, TOP_N};
use super::{CollectError, PostgresCollector};
use crate::model::TableSizeRow;

impl PostgresCollector {
    /// Top 20 tables by total size (data + indexes + TOAST).
    pub fn fetch_table_sizes(&self) -> Option<Vec<TableSizeRow>> {
        match self.try_table_sizes() {
            Ok(rows) => Some(rows),
            Err(e) => {
                warn!("table sizes unavailable: {}", e);
                None
            }
        }
    }

    fn try_table_sizes(&self) -> Result<Vec<TableSizeRow>, CollectError> {
        let mut conn = self.acquire()?;
        let limit = TOP_N as i64;
        let rows = conn
            .query(TABLE_SIZES, &[&TABLE_SCHEMA, &limit])
            .map_err(|e| CollectError::from_query(&e))?;

        let tables = rows
            .iter()
            .map(|row| TableSizeRow {
                schema: row.get("schemaname"),
                table_name: row.get("table_name"),
                size_pretty: row.get("size_pretty"),
                size_bytes: row.get("size_bytes"),
            })
            .collect();

        Ok(normalize_table_sizes(tables))
    }
}

/// Sorts by `size_bytes` descending (stable) and keeps at most 20 rows.
pub fn normalize_table_sizes(mut rows: Vec<TableSizeRow>) -> Vec<TableSizeRow> {
    rows.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    rows.truncate(TOP_N);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, size_bytes: i64) -> TableSizeRow {
        TableSizeRow {
            schema: "public".to_string(),
            table_name: name.to_string(),
            size_pretty: format!("{} bytes", size_bytes),
            size_bytes,
        }
    }

    #[test]
    fn caps_at_twenty_and_is_non_increasing() {
        // Deterministic pseudo-random sizes, deliberately unsorted.
        let rows: Vec<TableSizeRow> = (0..57)
            .map(|i| table(&format!("t{}", i), (i * 7919 % 101) * 8192))
            .collect();
        let out = normalize_table_sizes(rows);
        assert_eq!(out.len(), 20);
        assert!(out.windows(2).all(|w| w[0].size_bytes >= w[1].size_bytes));
    }

    #[test]
    fn short_lists_are_kept_whole() {
        let out = normalize_table_sizes(vec![table("a", 1), table("b", 3), table("c", 2)]);
        let names: Vec<&str> = out.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn empty_schema_yields_empty_list() {
        assert!(normalize_table_sizes(Vec::new()).is_empty());
    }
}
