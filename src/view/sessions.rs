//! Session table (pg_stat_activity) with summary counters.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::fmt;
use crate::model::ConnectionRow;
use crate::view::common::{RowStyleClass, Section, TableViewModel, ViewCell, ViewRow};

const SESSION_HEADERS: &[&str] = &[
    "PID", "USER", "APP", "CLIENT", "STATE", "BACKEND", "QUERY AGE", "QUERY",
];
const SESSION_WIDTHS: &[u16] = &[7, 14, 18, 21, 20, 8, 9, 100];

/// Query text is cut to this many characters.
pub const QUERY_DISPLAY_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub total: usize,
    pub active: usize,
    /// Distinct non-empty application names.
    pub applications: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionsViewModel {
    pub summary: SessionSummary,
    pub table: TableViewModel<i32>,
}

pub fn summarize_sessions(rows: &[ConnectionRow]) -> SessionSummary {
    let applications: HashSet<&str> = rows
        .iter()
        .map(|r| r.application_name.as_str())
        .filter(|a| !a.is_empty())
        .collect();
    SessionSummary {
        total: rows.len(),
        active: rows.iter().filter(|r| r.state == "active").count(),
        applications: applications.len(),
    }
}

/// Row style from `pg_stat_activity.state`.
fn state_style(state: &str) -> RowStyleClass {
    match state {
        "active" => RowStyleClass::Active,
        "idle in transaction (aborted)" => RowStyleClass::Critical,
        "idle in transaction" => RowStyleClass::Warning,
        "idle" => RowStyleClass::Dimmed,
        _ => RowStyleClass::Normal,
    }
}

fn client_endpoint(row: &ConnectionRow) -> String {
    match (&row.client_address, row.client_port) {
        (Some(addr), Some(port)) if port >= 0 => format!("{}:{}", addr, port),
        (Some(addr), _) => addr.clone(),
        _ => "local".to_string(),
    }
}

pub fn build_sessions(
    rows: Option<&[ConnectionRow]>,
    now: &DateTime<Utc>,
) -> Section<SessionsViewModel> {
    let Some(rows) = rows else {
        return Section::unavailable("Sessions");
    };

    let mut table = TableViewModel::new("Sessions", SESSION_HEADERS, SESSION_WIDTHS);
    table.rows = rows
        .iter()
        .map(|row| ViewRow {
            id: row.pid,
            cells: vec![
                ViewCell::plain(row.pid.to_string()),
                ViewCell::plain(row.username.clone().unwrap_or_else(|| "-".into())),
                ViewCell::plain(if row.application_name.is_empty() {
                    "-".to_string()
                } else {
                    row.application_name.clone()
                }),
                ViewCell::plain(client_endpoint(row)),
                ViewCell::plain(row.state.clone()),
                ViewCell::plain(fmt::format_age(row.backend_start.as_ref(), now)),
                ViewCell::plain(fmt::format_age(row.query_start.as_ref(), now)),
                ViewCell::plain(fmt::truncate(
                    &fmt::normalize_for_display(&row.query_text),
                    QUERY_DISPLAY_CHARS,
                )),
            ],
            style: state_style(&row.state),
        })
        .collect();

    Section::Available(SessionsViewModel {
        summary: summarize_sessions(rows),
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pid: i32, app: &str, state: &str, query: &str) -> ConnectionRow {
        ConnectionRow {
            pid,
            username: Some("app".to_string()),
            application_name: app.to_string(),
            client_address: Some("10.0.0.5".to_string()),
            client_port: Some(51234),
            state: state.to_string(),
            query_text: query.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn summary_counts_active_and_distinct_apps() {
        let rows = vec![
            row(1, "api", "active", "SELECT 1"),
            row(2, "api", "idle", ""),
            row(3, "", "active", "SELECT 2"),
            row(4, "worker", "idle in transaction", "UPDATE t SET x = 1"),
        ];
        assert_eq!(
            summarize_sessions(&rows),
            SessionSummary {
                total: 4,
                active: 2,
                applications: 2
            }
        );
    }

    #[test]
    fn long_queries_are_cut_to_display_width() {
        let long = format!("SELECT {}\nFROM t", "x, ".repeat(80));
        let rows = vec![row(10, "api", "active", &long)];
        let section = build_sessions(Some(rows.as_slice()), &Utc::now());
        let view = section.available().unwrap();
        let query = &view.table.rows[0].cells[7].text;
        assert_eq!(query.chars().count(), QUERY_DISPLAY_CHARS);
        assert!(query.ends_with('…'));
        assert!(!query.contains('\n'));
        assert_eq!(view.table.rows[0].cells[3].text, "10.0.0.5:51234");
        assert_eq!(view.table.rows[0].style, RowStyleClass::Active);
    }

    #[test]
    fn unix_socket_clients_show_local() {
        let mut r = row(5, "psql", "idle", "");
        r.client_address = None;
        r.client_port = Some(-1);
        assert_eq!(client_endpoint(&r), "local");
    }

    #[test]
    fn missing_sessions_is_a_placeholder() {
        assert!(!build_sessions(None, &Utc::now()).is_available());
    }
}
