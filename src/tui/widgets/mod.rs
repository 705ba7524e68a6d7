//! Dashboard widgets.

mod cards;
mod footer;
mod header;
mod objects;
mod preview;
mod probes;
mod quit_confirm;
mod sessions;
mod tiles;

pub use cards::{render_connection_card, render_server_card};
pub use footer::render_footer;
pub use header::render_header;
pub use objects::{render_index_usage, render_table_sizes};
pub use preview::render_preview;
pub use probes::render_probes;
pub use quit_confirm::render_quit_confirm;
pub use sessions::render_sessions;
pub use tiles::render_tiles;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::view::common::TableViewModel;

use super::style::Styles;

/// Bordered block with a styled title.
pub(crate) fn section_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), Styles::title()))
        .borders(Borders::ALL)
        .border_style(Styles::border())
}

/// Neutral placeholder for a section whose data did not come back.
pub(crate) fn render_unavailable(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let paragraph = Paragraph::new(text.to_string())
        .block(section_block(title))
        .style(Styles::dim())
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Renders a table view model. The last column takes the remaining width.
pub(crate) fn render_view_table<Id>(
    frame: &mut Frame,
    area: Rect,
    model: &TableViewModel<Id>,
    title: &str,
) {
    if model.rows.is_empty() {
        let paragraph = Paragraph::new("No data available")
            .block(section_block(title))
            .style(Styles::dim())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(model.headers.iter().map(|h| Cell::from(h.as_str())))
        .style(Styles::table_header());

    let rows = model.rows.iter().map(|row| {
        let cells = row.cells.iter().map(|cell| {
            let c = Cell::from(cell.text.as_str());
            match cell.style {
                Some(style) => c.style(Styles::class(style)),
                None => c,
            }
        });
        Row::new(cells).style(Styles::class(row.style))
    });

    let last = model.widths.len().saturating_sub(1);
    let widths: Vec<Constraint> = model
        .widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            if i == last {
                Constraint::Min((*w).min(10))
            } else {
                Constraint::Length(*w)
            }
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(section_block(title))
        .style(Styles::default());
    frame.render_widget(table, area);
}
