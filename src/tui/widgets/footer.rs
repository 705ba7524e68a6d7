//! Footer: status message or key help.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::Styles;

const KEY_HELP: &[(&str, &str)] = &[
    ("q", "quit"),
    ("r", "refresh"),
    ("a/space", "auto-refresh"),
    ("+/-", "interval"),
    ("p", "preview"),
    ("e", "export"),
];

pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match &state.status_message {
        Some(msg) => Line::from(Span::styled(format!(" {}", msg), Styles::title())),
        None => Line::from(
            KEY_HELP
                .iter()
                .flat_map(|(key, action)| {
                    [
                        Span::styled(format!(" {}", key), Styles::key()),
                        Span::styled(format!(" {} ", action), Styles::dim()),
                    ]
                })
                .collect::<Vec<_>>(),
        ),
    };
    frame.render_widget(Paragraph::new(line), area);
}
