//! "Exit pgdash" confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use super::section_block;
use crate::tui::style::Styles;

/// Key hints: keys, then what they do.
const HINTS: [(&str, &str); 2] = [("Enter / q", "quit"), ("Esc / n", "keep monitoring")];

const WIDTH: u16 = 44;
const HEIGHT: u16 = 7;

pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(HEIGHT.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    let mut lines = vec![
        Line::from("Stop monitoring and quit?"),
        Line::from(""),
    ];
    lines.extend(HINTS.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(*keys, Styles::key()),
            Span::styled(format!("  {}", action), Styles::dim()),
        ])
    }));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(section_block("Exit pgdash"))
            .alignment(Alignment::Center),
        popup,
    );
}
