//! Connection card.

use crate::fmt;
use crate::model::ConnectionStatus;
use crate::view::common::{CardViewModel, RowStyleClass, ViewCell};

pub const CONNECTED: &str = "CONNECTED";
pub const DISCONNECTED: &str = "DISCONNECTED";

/// Ping above this many milliseconds is highlighted.
const SLOW_PING_MS: f64 = 100.0;

/// Always available: a failed dial is itself the content of the card.
pub fn build_connection_card(status: &ConnectionStatus) -> CardViewModel {
    if !status.connected {
        let error = status.error.as_deref().unwrap_or("connection failed");
        return CardViewModel {
            title: "Connection".to_string(),
            headline: Some(ViewCell::styled(DISCONNECTED, RowStyleClass::Critical)),
            fields: vec![(
                "Error".to_string(),
                ViewCell::styled(fmt::normalize_for_display(error), RowStyleClass::Critical),
            )],
        };
    }

    let ping = match status.ping_ms {
        Some(ms) if ms > SLOW_PING_MS => ViewCell::styled(fmt::format_ms(ms), RowStyleClass::Warning),
        Some(ms) => ViewCell::plain(fmt::format_ms(ms)),
        None => ViewCell::plain("-"),
    };
    CardViewModel {
        title: "Connection".to_string(),
        headline: Some(ViewCell::styled(CONNECTED, RowStyleClass::Active)),
        fields: vec![
            ("Ping".to_string(), ping),
            (
                "Database".to_string(),
                ViewCell::plain(status.database_name.clone().unwrap_or_else(|| "-".into())),
            ),
        ],
    }
}
