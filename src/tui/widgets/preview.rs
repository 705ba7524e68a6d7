//! Report preview popup: the content of the PNG export as text.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::fmt;
use crate::report::ReportData;
use crate::tui::style::Styles;
use crate::view::common::{BarPoint, Section};

/// Width of the text bars, in cells.
const BAR_CELLS: usize = 30;

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Styles::title().add_modifier(Modifier::UNDERLINED),
    ))
}

fn bar_lines(bars: &Section<Vec<BarPoint>>, value: impl Fn(f64) -> String) -> Vec<Line<'static>> {
    let bars = match bars {
        Section::Available(bars) if !bars.is_empty() => bars,
        Section::Available(_) => return vec![Line::styled("  No data", Styles::dim())],
        Section::Unavailable(text) => return vec![Line::styled(format!("  {}", text), Styles::dim())],
    };
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    bars.iter()
        .map(|b| {
            let cells = if max > 0.0 {
                ((b.value / max) * BAR_CELLS as f64).round() as usize
            } else {
                0
            };
            Line::from(vec![
                Span::raw(format!("  {:<20}", fmt::truncate(&b.label, 20))),
                Span::styled("█".repeat(cells.max(1)), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {}", value(b.value))),
            ])
        })
        .collect()
}

fn report_lines(data: &ReportData) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            data.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::styled(
            format!(
                "{}  ·  {}",
                data.database,
                fmt::format_timestamp(&data.generated_at)
            ),
            Styles::dim(),
        ),
        Line::from(""),
        heading("Connectivity"),
    ];

    if let Some(headline) = &data.connection.headline {
        lines.push(Line::styled(
            format!("  {}", headline.text),
            Styles::class(headline.style.unwrap_or_default()).add_modifier(Modifier::BOLD),
        ));
    }
    for (label, value) in &data.connection.fields {
        lines.push(Line::raw(format!("  {}: {}", label, value.text)));
    }

    lines.push(Line::from(""));
    lines.push(heading("Server"));
    match &data.server {
        Section::Available(card) => {
            for (label, value) in &card.fields {
                lines.push(Line::raw(format!("  {:<12}{}", label, value.text)));
            }
        }
        Section::Unavailable(text) => lines.push(Line::styled(format!("  {}", text), Styles::dim())),
    }

    lines.push(Line::from(""));
    lines.push(heading("Performance"));
    match &data.tiles {
        Section::Available(tiles) => {
            for tile in tiles {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:<18}", tile.label)),
                    Span::styled(tile.value.clone(), Styles::class(tile.style)),
                ]));
            }
        }
        Section::Unavailable(text) => lines.push(Line::styled(format!("  {}", text), Styles::dim())),
    }

    lines.push(Line::from(""));
    lines.push(heading("Query latency (ms)"));
    lines.extend(bar_lines(&data.probe_bars, fmt::format_ms));

    lines.push(Line::from(""));
    lines.push(heading("Largest tables (MB)"));
    lines.extend(bar_lines(&data.table_bars, |v| format!("{:.1} MB", v)));

    lines.push(Line::from(""));
    lines.push(Line::styled("  e export PNG · Esc close", Styles::key()));
    lines
}

pub fn render_preview(frame: &mut Frame, area: Rect, data: &ReportData) {
    let popup_width = (area.width * 70 / 100).clamp(50, 90).min(area.width);
    let popup_height = (area.height * 85 / 100).max(10).min(area.height);
    let popup_area = Rect::new(
        area.width.saturating_sub(popup_width) / 2,
        area.height.saturating_sub(popup_height) / 2,
        popup_width,
        popup_height,
    );

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(" Report preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(report_lines(data))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}
