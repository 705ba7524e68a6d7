//! Metric tiles row.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::widgets::Paragraph;

use super::{render_unavailable, section_block};
use crate::tui::style::Styles;
use crate::view::common::{Section, TileViewModel};

pub fn render_tiles(frame: &mut Frame, area: Rect, tiles: &Section<Vec<TileViewModel>>) {
    let tiles = match tiles {
        Section::Available(tiles) if !tiles.is_empty() => tiles,
        Section::Available(_) => return,
        Section::Unavailable(text) => {
            return render_unavailable(frame, area, "Performance", text);
        }
    };

    let constraints = vec![Constraint::Ratio(1, tiles.len() as u32); tiles.len()];
    let chunks = Layout::horizontal(constraints).split(area);
    for (tile, chunk) in tiles.iter().zip(chunks.iter()) {
        let paragraph = Paragraph::new(tile.value.as_str())
            .block(section_block(&tile.label))
            .style(Styles::class(tile.style).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, *chunk);
    }
}
