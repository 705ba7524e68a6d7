//! Largest tables and index usage lists.

use ratatui::Frame;
use ratatui::layout::Rect;

use super::{render_unavailable, render_view_table};
use crate::view::common::{Section, TableViewModel};

pub fn render_table_sizes(frame: &mut Frame, area: Rect, tables: &Section<TableViewModel<String>>) {
    match tables {
        Section::Available(model) => render_view_table(frame, area, model, &model.title),
        Section::Unavailable(text) => render_unavailable(frame, area, "Largest tables", text),
    }
}

pub fn render_index_usage(
    frame: &mut Frame,
    area: Rect,
    indexes: &Section<TableViewModel<String>>,
) {
    match indexes {
        Section::Available(model) => render_view_table(frame, area, model, &model.title),
        Section::Unavailable(text) => render_unavailable(frame, area, "Index usage", text),
    }
}
