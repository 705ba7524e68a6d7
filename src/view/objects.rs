//! Largest tables and index usage.

use crate::model::{IndexUsageRow, TableSizeRow};
use crate::view::common::{BarPoint, RowStyleClass, Section, TableViewModel, ViewCell, ViewRow};

const TABLE_HEADERS: &[&str] = &["SCHEMA", "TABLE", "SIZE"];
const TABLE_WIDTHS: &[u16] = &[10, 32, 12];

const INDEX_HEADERS: &[&str] = &["TABLE", "INDEX", "SCANS", "TUP_READ", "TUP_FETCH", "SIZE"];
const INDEX_WIDTHS: &[u16] = &[20, 32, 10, 11, 11, 10];

/// Rows shown on the dashboard per list.
pub const DASHBOARD_OBJECT_ROWS: usize = 10;

/// Bars in the report's table-size chart.
pub const REPORT_TABLE_BARS: usize = 5;

pub fn build_table_sizes(
    rows: Option<&[TableSizeRow]>,
    limit: usize,
) -> Section<TableViewModel<String>> {
    let Some(rows) = rows else {
        return Section::unavailable("Table sizes");
    };

    let mut table = TableViewModel::new("Largest tables", TABLE_HEADERS, TABLE_WIDTHS);
    table.rows = rows
        .iter()
        .take(limit)
        .map(|t| ViewRow {
            id: format!("{}.{}", t.schema, t.table_name),
            cells: vec![
                ViewCell::plain(t.schema.clone()),
                ViewCell::plain(t.table_name.clone()),
                ViewCell::plain(t.size_pretty.clone()),
            ],
            style: RowStyleClass::Normal,
        })
        .collect();
    Section::Available(table)
}

pub fn build_index_usage(
    rows: Option<&[IndexUsageRow]>,
    limit: usize,
) -> Section<TableViewModel<String>> {
    let Some(rows) = rows else {
        return Section::unavailable("Index usage");
    };

    let mut table = TableViewModel::new("Index usage", INDEX_HEADERS, INDEX_WIDTHS);
    table.rows = rows
        .iter()
        .take(limit)
        .map(|i| {
            // never scanned since stats reset
            let style = if i.index_scans == 0 {
                RowStyleClass::Warning
            } else {
                RowStyleClass::Normal
            };
            ViewRow {
                id: format!("{}.{}", i.schema, i.index_name),
                cells: vec![
                    ViewCell::plain(i.table_name.clone()),
                    ViewCell::plain(i.index_name.clone()),
                    ViewCell::plain(i.index_scans.to_string()),
                    ViewCell::plain(i.tuples_read.to_string()),
                    ViewCell::plain(i.tuples_fetched.to_string()),
                    ViewCell::plain(i.index_size.clone()),
                ],
                style,
            }
        })
        .collect();
    Section::Available(table)
}

/// Top `limit` tables as megabyte bars.
pub fn table_size_bars(rows: &[TableSizeRow], limit: usize) -> Vec<BarPoint> {
    rows.iter()
        .take(limit)
        .map(|t| BarPoint {
            label: t.table_name.clone(),
            value: t.size_bytes.max(0) as f64 / (1024.0 * 1024.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, mb: i64) -> TableSizeRow {
        TableSizeRow {
            schema: "public".to_string(),
            table_name: name.to_string(),
            size_pretty: format!("{} MB", mb),
            size_bytes: mb * 1024 * 1024,
        }
    }

    #[test]
    fn dashboard_shows_at_most_limit_rows() {
        let rows: Vec<TableSizeRow> = (0..20).map(|i| table(&format!("t{i}"), 20 - i)).collect();
        let section = build_table_sizes(Some(rows.as_slice()), DASHBOARD_OBJECT_ROWS);
        assert_eq!(section.available().unwrap().rows.len(), 10);
    }

    #[test]
    fn table_bars_are_megabytes_of_top_five() {
        let rows: Vec<TableSizeRow> = (0..8).map(|i| table(&format!("t{i}"), 80 - i * 10)).collect();
        let bars = table_size_bars(&rows, REPORT_TABLE_BARS);
        assert_eq!(bars.len(), 5);
        assert_eq!(bars[0].label, "t0");
        assert_eq!(bars[0].value, 80.0);
        assert_eq!(bars[4].value, 40.0);
    }

    #[test]
    fn unused_indexes_are_flagged() {
        let rows = vec![IndexUsageRow {
            schema: "public".into(),
            table_name: "orders".into(),
            index_name: "orders_legacy_idx".into(),
            index_scans: 0,
            index_size: "8192 bytes".into(),
            ..Default::default()
        }];
        let section = build_index_usage(Some(rows.as_slice()), DASHBOARD_OBJECT_ROWS);
        let table = section.available().unwrap();
        assert_eq!(table.rows[0].style, RowStyleClass::Warning);
        assert_eq!(table.rows[0].cells[5].text, "8192 bytes");
    }

    #[test]
    fn empty_schema_is_available_but_empty() {
        let empty: Vec<TableSizeRow> = Vec::new();
        let section = build_table_sizes(Some(empty.as_slice()), DASHBOARD_OBJECT_ROWS);
        assert!(section.available().unwrap().rows.is_empty());
        assert!(!build_index_usage(None, 10).is_available());
    }
}
