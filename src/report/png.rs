//! PNG rendering with plotters (bitmap backend, embedded fonts).

use std::path::Path;
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, register_font};

use super::{ReportData, ReportError};
use crate::fmt;
use crate::view::common::{BarPoint, CardViewModel, RowStyleClass, Section, TileViewModel};

pub const REPORT_WIDTH: u32 = 1080;
pub const REPORT_HEIGHT: u32 = 1920;

static FONT_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static FONT_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

const BACKGROUND: RGBColor = RGBColor(244, 246, 249);
const HEADER_BG: RGBColor = RGBColor(31, 58, 104);
const CARD_BG: RGBColor = RGBColor(255, 255, 255);
const CARD_BORDER: RGBColor = RGBColor(208, 215, 222);
const TEXT: RGBColor = RGBColor(36, 41, 47);
const TEXT_DIM: RGBColor = RGBColor(110, 119, 129);
const GREEN: RGBColor = RGBColor(26, 127, 55);
const RED: RGBColor = RGBColor(207, 34, 46);
const YELLOW: RGBColor = RGBColor(191, 135, 0);
const CYAN: RGBColor = RGBColor(9, 105, 218);
const PROBE_BAR: RGBColor = RGBColor(84, 174, 255);
const TABLE_BAR: RGBColor = RGBColor(130, 80, 223);

const MARGIN: i32 = 40;
const RIGHT: i32 = REPORT_WIDTH as i32 - MARGIN;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn render_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Render(e.to_string())
}

/// Registers the embedded DejaVu fonts as `sans-serif` once per process.
fn register_fonts() -> Result<(), ReportError> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font("sans-serif", FontStyle::Normal, FONT_REGULAR)
                .map_err(|_| "DejaVuSans.ttf is not a valid font".to_string())?;
            register_font("sans-serif", FontStyle::Bold, FONT_BOLD)
                .map_err(|_| "DejaVuSans-Bold.ttf is not a valid font".to_string())?;
            Ok(())
        })
        .clone()
        .map_err(ReportError::Font)
}

fn class_color(class: RowStyleClass) -> RGBColor {
    match class {
        RowStyleClass::Normal => TEXT,
        RowStyleClass::Warning => YELLOW,
        RowStyleClass::Critical => RED,
        RowStyleClass::Active => GREEN,
        RowStyleClass::Dimmed => TEXT_DIM,
        RowStyleClass::Accent => CYAN,
    }
}

fn font(size: f64, bold: bool) -> FontDesc<'static> {
    let style = if bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    FontDesc::new(FontFamily::SansSerif, size, style)
}

fn draw_text(
    area: &Area,
    text: &str,
    at: (i32, i32),
    size: f64,
    bold: bool,
    color: &RGBColor,
    anchor: Pos,
) -> Result<(), ReportError> {
    let style = TextStyle::from(font(size, bold)).color(color).pos(anchor);
    area.draw_text(text, &style, at).map_err(render_err)
}

fn top_left() -> Pos {
    Pos::new(HPos::Left, VPos::Top)
}

fn centered() -> Pos {
    Pos::new(HPos::Center, VPos::Center)
}

/// White card with a border and a bold title; returns the y below the title.
fn draw_card(area: &Area, top: i32, bottom: i32, title: &str) -> Result<i32, ReportError> {
    area.draw(&Rectangle::new(
        [(MARGIN, top), (RIGHT, bottom)],
        CARD_BG.filled(),
    ))
    .map_err(render_err)?;
    area.draw(&Rectangle::new(
        [(MARGIN, top), (RIGHT, bottom)],
        CARD_BORDER.stroke_width(2),
    ))
    .map_err(render_err)?;
    draw_text(area, title, (MARGIN + 28, top + 22), 30.0, true, &TEXT_DIM, top_left())?;
    Ok(top + 70)
}

/// Writes the report to `path`.
pub fn render_png(data: &ReportData, path: &Path) -> Result<(), ReportError> {
    register_fonts()?;

    let root = BitMapBackend::new(path, (REPORT_WIDTH, REPORT_HEIGHT)).into_drawing_area();
    root.fill(&BACKGROUND).map_err(render_err)?;

    draw_header(&root, data)?;
    draw_connection(&root, &data.connection, 190, 380)?;
    draw_server(&root, &data.server, 400, 640)?;
    draw_tiles(&root, &data.tiles, 660, 840)?;
    draw_bar_chart(
        &root,
        (870, 1320),
        "Query latency (ms)",
        &data.probe_bars,
        &PROBE_BAR,
        fmt::format_ms,
    )?;
    draw_bar_chart(
        &root,
        (1340, 1790),
        "Largest tables (MB)",
        &data.table_bars,
        &TABLE_BAR,
        |v| format!("{:.1} MB", v),
    )?;
    draw_footer(&root)?;

    root.present().map_err(render_err)
}

fn draw_header(root: &Area, data: &ReportData) -> Result<(), ReportError> {
    root.draw(&Rectangle::new(
        [(0, 0), (REPORT_WIDTH as i32, 160)],
        HEADER_BG.filled(),
    ))
    .map_err(render_err)?;
    draw_text(root, &data.title, (MARGIN, 36), 52.0, true, &WHITE, top_left())?;
    let subtitle = format!(
        "{}  ·  {}",
        data.database,
        fmt::format_timestamp(&data.generated_at)
    );
    draw_text(root, &subtitle, (MARGIN, 108), 28.0, false, &WHITE, top_left())
}

fn draw_connection(
    root: &Area,
    card: &CardViewModel,
    top: i32,
    bottom: i32,
) -> Result<(), ReportError> {
    let y = draw_card(root, top, bottom, "Connectivity")?;
    if let Some(headline) = &card.headline {
        let color = class_color(headline.style.unwrap_or_default());
        draw_text(root, &headline.text, (MARGIN + 28, y), 48.0, true, &color, top_left())?;
    }
    let mut line_y = y + 66;
    for (label, value) in &card.fields {
        let color = class_color(value.style.unwrap_or_default());
        let line = format!("{}: {}", label, fmt::truncate(&value.text, 60));
        draw_text(root, &line, (MARGIN + 28, line_y), 26.0, false, &color, top_left())?;
        line_y += 36;
    }
    Ok(())
}

fn draw_server(
    root: &Area,
    server: &Section<CardViewModel>,
    top: i32,
    bottom: i32,
) -> Result<(), ReportError> {
    let y = draw_card(root, top, bottom, "Server")?;
    let card = match server {
        Section::Available(card) => card,
        Section::Unavailable(text) => return draw_placeholder(root, text, top, bottom),
    };
    if let Some(headline) = &card.headline {
        draw_text(root, &headline.text, (MARGIN + 28, y), 28.0, true, &CYAN, top_left())?;
    }
    // Two columns, two rows.
    let col_width = (RIGHT - MARGIN) / 2;
    for (i, (label, value)) in card.fields.iter().enumerate() {
        let x = MARGIN + 28 + (i as i32 % 2) * col_width;
        let row_y = y + 50 + (i as i32 / 2) * 60;
        draw_text(root, label, (x, row_y), 22.0, false, &TEXT_DIM, top_left())?;
        let color = class_color(value.style.unwrap_or_default());
        draw_text(root, &value.text, (x, row_y + 26), 28.0, true, &color, top_left())?;
    }
    Ok(())
}

fn draw_tiles(
    root: &Area,
    tiles: &Section<Vec<TileViewModel>>,
    top: i32,
    bottom: i32,
) -> Result<(), ReportError> {
    let tiles = match tiles {
        Section::Available(tiles) if !tiles.is_empty() => tiles,
        Section::Available(_) => return Ok(()),
        Section::Unavailable(text) => {
            draw_card(root, top, bottom, "Performance")?;
            return draw_placeholder(root, text, top, bottom);
        }
    };

    let gap = 20;
    let count = tiles.len() as i32;
    let width = (RIGHT - MARGIN - gap * (count - 1)) / count;
    for (i, tile) in tiles.iter().enumerate() {
        let x0 = MARGIN + i as i32 * (width + gap);
        let x1 = x0 + width;
        root.draw(&Rectangle::new([(x0, top), (x1, bottom)], CARD_BG.filled()))
            .map_err(render_err)?;
        root.draw(&Rectangle::new(
            [(x0, top), (x1, bottom)],
            CARD_BORDER.stroke_width(2),
        ))
        .map_err(render_err)?;
        let cx = (x0 + x1) / 2;
        draw_text(root, &tile.label, (cx, top + 45), 22.0, false, &TEXT_DIM, centered())?;
        let color = class_color(tile.style);
        draw_text(root, &tile.value, (cx, top + 115), 44.0, true, &color, centered())?;
    }
    Ok(())
}

fn draw_placeholder(root: &Area, text: &str, top: i32, bottom: i32) -> Result<(), ReportError> {
    let center = ((MARGIN + RIGHT) / 2, (top + bottom) / 2 + 20);
    draw_text(root, text, center, 28.0, false, &TEXT_DIM, centered())
}

/// Card with a vertical bar chart: one bar per point, value above the bar,
/// name below the axis.
fn draw_bar_chart(
    root: &Area,
    (top, bottom): (i32, i32),
    title: &str,
    bars: &Section<Vec<BarPoint>>,
    color: &RGBColor,
    value_label: impl Fn(f64) -> String,
) -> Result<(), ReportError> {
    let y = draw_card(root, top, bottom, title)?;
    let bars = match bars {
        Section::Available(bars) if !bars.is_empty() => bars,
        Section::Available(_) => return draw_placeholder(root, "No data", top, bottom),
        Section::Unavailable(text) => return draw_placeholder(root, text, top, bottom),
    };

    let label_strip = 50;
    let chart_area = root.clone().shrink(
        (MARGIN + 10, y),
        (
            (RIGHT - MARGIN - 20) as u32,
            (bottom - y - label_strip - 10).max(1) as u32,
        ),
    );

    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let y_max = if max > 0.0 { max * 1.25 } else { 1.0 };
    let count = bars.len() as f64;

    let mut chart = ChartBuilder::on(&chart_area)
        .margin_right(20)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..count, 0.0..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{:.1}", v))
        .y_label_style(font(18.0, false).color(&TEXT_DIM))
        .light_line_style(CARD_BORDER.mix(0.5))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let x = i as f64;
            Rectangle::new([(x + 0.18, 0.0), (x + 0.82, bar.value)], color.filled())
        }))
        .map_err(render_err)?;

    let value_style = TextStyle::from(font(20.0, true))
        .color(&TEXT)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                value_label(bar.value),
                (i as f64 + 0.5, bar.value),
                value_style.clone(),
            )
        }))
        .map_err(render_err)?;

    let name_anchor = Pos::new(HPos::Center, VPos::Top);
    for (i, bar) in bars.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(i as f64 + 0.5, 0.0));
        let name = fmt::truncate(&bar.label, 16);
        draw_text(root, &name, (px, py + 12), 20.0, false, &TEXT, name_anchor)?;
    }
    Ok(())
}

fn draw_footer(root: &Area) -> Result<(), ReportError> {
    let text = format!(
        "Generated by pgdash {} · read-only PostgreSQL monitoring",
        env!("CARGO_PKG_VERSION")
    );
    let y = REPORT_HEIGHT as i32 - 60;
    draw_text(root, &text, (REPORT_WIDTH as i32 / 2, y), 22.0, false, &TEXT_DIM, centered())
}
