//! Session summary and session table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{render_unavailable, render_view_table};
use crate::tui::style::Styles;
use crate::view::common::Section;
use crate::view::sessions::SessionsViewModel;

pub fn render_sessions(frame: &mut Frame, area: Rect, sessions: &Section<SessionsViewModel>) {
    let view = match sessions {
        Section::Available(view) => view,
        Section::Unavailable(text) => return render_unavailable(frame, area, "Sessions", text),
    };

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(area);

    let summary = Line::from(vec![
        Span::styled(" Total ", Styles::dim()),
        Span::raw(view.summary.total.to_string()),
        Span::styled("  Active ", Styles::dim()),
        Span::raw(view.summary.active.to_string()),
        Span::styled("  Applications ", Styles::dim()),
        Span::raw(view.summary.applications.to_string()),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    render_view_table(frame, chunks[1], &view.table, "Sessions");
}
