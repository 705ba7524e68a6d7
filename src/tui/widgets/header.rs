//! Header bar: name, clock, LIVE/PAUSED, interval, database.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::fmt;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(8),  // Name
        Constraint::Length(22), // Time
        Constraint::Length(9),  // Mode
        Constraint::Length(16), // Interval
        Constraint::Min(10),    // Database
    ])
    .split(area);

    frame.render_widget(Paragraph::new(" pgdash").style(Styles::header()), chunks[0]);

    let time_str = match &state.snapshot {
        Some(snap) => fmt::format_timestamp(&snap.taken_at),
        None => Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    frame.render_widget(
        Paragraph::new(format!(" {}", time_str)).style(Styles::header()),
        chunks[1],
    );

    let mode = if state.paused { " PAUSED " } else { " LIVE " };
    frame.render_widget(Paragraph::new(mode).style(Styles::header()), chunks[2]);

    frame.render_widget(
        Paragraph::new(format!(" every {} ms", state.interval_ms())).style(Styles::header()),
        chunks[3],
    );

    frame.render_widget(
        Paragraph::new(format!(" {}", state.database_label)).style(Styles::header()),
        chunks[4],
    );
}
