//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use super::state::{AppState, PopupState};
use super::style::Styles;
use super::widgets::{
    render_connection_card, render_footer, render_header, render_index_usage, render_preview,
    render_probes, render_quit_confirm, render_server_card, render_sessions, render_table_sizes,
    render_tiles,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1),  // Header
        Constraint::Length(8),  // Connection + server cards
        Constraint::Length(3),  // Metric tiles
        Constraint::Length(9),  // Probes
        Constraint::Min(6),     // Sessions
        Constraint::Length(12), // Tables + indexes
        Constraint::Length(1),  // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_content(frame, &chunks[1..6], state);
    render_footer(frame, chunks[6], state);

    match &state.popup {
        PopupState::Preview(data) => render_preview(frame, area, data),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::None => {}
    }
}

fn render_content(frame: &mut Frame, chunks: &[Rect], state: &AppState) {
    let Some(view) = &state.view else {
        let waiting = Paragraph::new("Collecting first snapshot...").style(Styles::dim());
        frame.render_widget(waiting, chunks[0]);
        return;
    };

    let cards =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(chunks[0]);
    render_connection_card(frame, cards[0], &view.connection);
    render_server_card(frame, cards[1], &view.server);

    render_tiles(frame, chunks[1], &view.tiles);
    render_probes(frame, chunks[2], &view.probes);
    render_sessions(frame, chunks[3], &view.sessions);

    let objects =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(chunks[4]);
    render_table_sizes(frame, objects[0], &view.tables);
    render_index_usage(frame, objects[1], &view.indexes);
}
