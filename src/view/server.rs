//! Server info card.

use crate::fmt;
use crate::model::DatabaseInfo;
use crate::view::common::{CardViewModel, RowStyleClass, Section, ViewCell};

pub fn build_server_card(info: Option<&DatabaseInfo>) -> Section<CardViewModel> {
    let Some(info) = info else {
        return Section::unavailable("Server info");
    };

    let usage = connection_usage_pct(info.active_connections, info.max_connections);
    let connections = format!("{} / {}", info.active_connections, info.max_connections);
    let connections = if usage >= 95.0 {
        ViewCell::styled(connections, RowStyleClass::Critical)
    } else if usage >= 80.0 {
        ViewCell::styled(connections, RowStyleClass::Warning)
    } else {
        ViewCell::plain(connections)
    };

    Section::Available(CardViewModel {
        title: "Server".to_string(),
        headline: Some(ViewCell::styled(
            fmt::short_version(&info.version),
            RowStyleClass::Accent,
        )),
        fields: vec![
            (
                "Size".to_string(),
                ViewCell::plain(fmt::format_bytes(info.database_size_bytes)),
            ),
            ("Connections".to_string(), connections),
            (
                "Uptime".to_string(),
                ViewCell::plain(fmt::format_duration(info.uptime_seconds)),
            ),
            (
                "Started".to_string(),
                ViewCell::plain(fmt::format_timestamp(&info.server_start_time)),
            ),
            ("Timezone".to_string(), ViewCell::plain(info.timezone.clone())),
        ],
    })
}

/// Share of `max_connections` in use, 0 when the limit is unknown.
fn connection_usage_pct(active: i64, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    active as f64 * 100.0 / max as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn info(active: i64, max: i32) -> DatabaseInfo {
        DatabaseInfo {
            version: "PostgreSQL 16.2 on x86_64-pc-linux-gnu, compiled by gcc".to_string(),
            server_start_time: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            current_time: Utc.with_ymd_and_hms(2026, 1, 1, 2, 0, 0).unwrap(),
            timezone: "UTC".to_string(),
            database_size_bytes: 1536,
            active_connections: active,
            max_connections: max,
            uptime_seconds: 7300.0,
        }
    }

    #[test]
    fn card_formats_sizes_and_uptime() {
        let section = build_server_card(Some(&info(7, 100)));
        let card = section.available().unwrap();
        assert_eq!(card.headline.as_ref().unwrap().text, "PostgreSQL 16.2");
        assert_eq!(card.field("Size").unwrap().text, "1.50 KB");
        assert_eq!(card.field("Connections").unwrap().text, "7 / 100");
        assert_eq!(card.field("Connections").unwrap().style, None);
        assert_eq!(card.field("Uptime").unwrap().text, "2.0 hours");
        assert_eq!(card.field("Timezone").unwrap().text, "UTC");
    }

    #[test]
    fn near_connection_limit_is_highlighted() {
        let section = build_server_card(Some(&info(96, 100)));
        let card = section.available().unwrap();
        assert_eq!(
            card.field("Connections").unwrap().style,
            Some(RowStyleClass::Critical)
        );
    }

    #[test]
    fn missing_info_is_a_placeholder() {
        assert_eq!(
            build_server_card(None),
            Section::Unavailable("Server info unavailable".to_string())
        );
    }
}
