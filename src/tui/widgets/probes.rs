//! Probe list with latency bars.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup};

use super::{render_unavailable, render_view_table, section_block};
use crate::fmt;
use crate::tui::style::{Styles, Theme};
use crate::view::common::Section;
use crate::view::probes::ProbesViewModel;

pub fn render_probes(frame: &mut Frame, area: Rect, probes: &Section<ProbesViewModel>) {
    let view = match probes {
        Section::Available(view) => view,
        Section::Unavailable(text) => {
            return render_unavailable(frame, area, "Query probes", text);
        }
    };

    let chunks =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(area);
    render_view_table(frame, chunks[0], &view.table, "Query probes");

    // Bar heights are integral: scale to microseconds.
    let bars: Vec<Bar> = view
        .bars
        .iter()
        .map(|b| {
            Bar::default()
                .value((b.value * 1000.0).round().max(0.0) as u64)
                .label(Line::from(b.label.clone()))
                .text_value(fmt::format_ms(b.value))
        })
        .collect();

    let chart = BarChart::default()
        .block(section_block("Latency"))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(ratatui::style::Style::default().fg(Theme::BAR))
        .value_style(Styles::default())
        .label_style(Styles::dim())
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, chunks[1]);
}
