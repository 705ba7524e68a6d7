//! Connection and server cards.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{render_unavailable, section_block};
use crate::tui::style::Styles;
use crate::view::common::{CardViewModel, Section};

fn card_lines(card: &CardViewModel) -> Vec<Line<'_>> {
    let mut lines = Vec::with_capacity(card.fields.len() + 1);
    if let Some(headline) = &card.headline {
        let style = Styles::class(headline.style.unwrap_or_default()).add_modifier(Modifier::BOLD);
        lines.push(Line::from(Span::styled(headline.text.as_str(), style)));
    }
    for (label, value) in &card.fields {
        let style = match value.style {
            Some(class) => Styles::class(class),
            None => Style::default(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", label), Styles::dim()),
            Span::styled(value.text.as_str(), style),
        ]));
    }
    lines
}

fn render_card(frame: &mut Frame, area: Rect, card: &CardViewModel) {
    let paragraph = Paragraph::new(card_lines(card))
        .block(section_block(&card.title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

pub fn render_connection_card(frame: &mut Frame, area: Rect, card: &CardViewModel) {
    render_card(frame, area, card);
}

pub fn render_server_card(frame: &mut Frame, area: Rect, server: &Section<CardViewModel>) {
    match server {
        Section::Available(card) => render_card(frame, area, card),
        Section::Unavailable(text) => render_unavailable(frame, area, "Server", text),
    }
}
