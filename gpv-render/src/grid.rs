//! Draw the hourly outage table for one date and export it as PNG.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use gpv_core::time::{DAY_FORMAT, LOCAL_TZ, format_day};
use gpv_core::{
    HOURS_PER_DAY, HourlyScheduleEntry, OutageState, ScheduleDocument, SelectedDate,
    display_order, select_target_date,
};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::info;

use crate::cell::half_colors;
use crate::error::RenderError;
use crate::fonts::{FontSet, FontStyle};
use crate::layout::*;
use crate::palette::{self, CellColor};

/// Single rendered artifact; every successful render overwrites it.
pub const DEFAULT_OUTPUT_PATH: &str = "out/images/gpv-all-today.png";

const TITLE_PREFIX: &str = "Графік погодинних відключень на";
const GROUP_HEADER: &str = "Черга";
const PUBLISHED_PREFIX: &str = "Опубліковано";
const LEGEND_STATES: [OutageState; 3] = [
    OutageState::Available,
    OutageState::Unavailable,
    OutageState::PossibleUnavailable,
];

/// Inclusive-corner rectangle, optionally filled and outlined.
fn rect(
    img: &mut RgbImage,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    fill: Option<Rgb<u8>>,
    outline: Option<Rgb<u8>>,
) {
    if x1 < x0 || y1 < y0 {
        return;
    }
    let r = Rect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
    if let Some(color) = fill {
        draw_filled_rect_mut(img, r, color);
    }
    if let Some(color) = outline {
        draw_hollow_rect_mut(img, r, color);
    }
}

fn line(img: &mut RgbImage, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
    draw_line_segment_mut(
        img,
        (from.0 as f32, from.1 as f32),
        (to.0 as f32, to.1 as f32),
        color,
    );
}

/// Draw `text` centred in the box starting at `(x, y)` of size `(w, h)`.
fn centered_text(
    img: &mut RgbImage,
    fonts: &FontSet,
    size: f32,
    (x, y): (i32, i32),
    (w, h): (i32, i32),
    text: &str,
) {
    let (tw, th) = fonts.measure(FontStyle::Regular, size, text);
    let tx = x + (w - tw as i32) / 2;
    let ty = y + (h - th as i32) / 2;
    fonts.draw(img, FontStyle::Regular, size, (tx, ty), palette::TEXT, text);
}

/// One hour cell. Equal halves draw as a single outlined block; differing
/// halves draw as two adjacent blocks with no stroke between them.
fn draw_cell(img: &mut RgbImage, x0: i32, y0: i32, colors: (CellColor, CellColor)) {
    let x1 = x0 + CELL_W;
    let y1 = y0 + CELL_H;
    let (left, right) = colors;

    if left == right {
        rect(img, (x0, y0), (x1, y1), Some(left.rgb()), Some(palette::GRID));
    } else {
        let half = CELL_W / 2;
        rect(img, (x0, y0), (x0 + half, y1), Some(left.rgb()), None);
        rect(img, (x0 + half, y0), (x1, y1), Some(right.rgb()), None);
    }
}

fn draw_title(img: &mut RgbImage, fonts: &FontSet, layout: &Layout, day_ts: i64) {
    let title = format!("{TITLE_PREFIX} {}", format_day(day_ts));
    let (w, _) = fonts.measure(FontStyle::Bold, TITLE_FONT_SIZE, &title);
    let x = SPACING + (layout.table_width() - w as i32) / 2;
    fonts.draw(
        img,
        FontStyle::Bold,
        TITLE_FONT_SIZE,
        (x, SPACING + 6),
        palette::TEXT,
        &title,
    );
}

fn draw_hour_header(img: &mut RgbImage, fonts: &FontSet, layout: &Layout) {
    let y0 = layout.hour_y0;
    let y1 = layout.table_y0;

    for hour in 1..=HOURS_PER_DAY {
        let x0 = layout.cell_x(hour);
        rect(img, (x0, y0), (x0 + CELL_W, y1), Some(palette::HEADER_BG), Some(palette::GRID));

        let parts = [
            format!("{:02}", hour - 1),
            "-".to_string(),
            format!("{:02}", hour % HOURS_PER_DAY),
        ];
        let sizes: Vec<(u32, u32)> = parts
            .iter()
            .map(|p| fonts.measure(FontStyle::Regular, HOUR_FONT_SIZE, p))
            .collect();
        let total_h: i32 = sizes.iter().map(|(_, h)| *h as i32).sum::<i32>() + 2 * HOUR_LINE_GAP;

        let mut y = y0 + (HOUR_ROW_H - total_h) / 2;
        for (part, (w, h)) in parts.iter().zip(&sizes) {
            let x = x0 + (CELL_W - *w as i32) / 2;
            fonts.draw(img, FontStyle::Regular, HOUR_FONT_SIZE, (x, y), palette::TEXT, part);
            y += *h as i32 + HOUR_LINE_GAP;
        }
    }

    rect(
        img,
        (layout.table_x0, y0),
        (layout.table_x0 + LEFT_COL_W, y1),
        Some(palette::HEADER_BG),
        Some(palette::GRID),
    );
    centered_text(
        img,
        fonts,
        HOUR_FONT_SIZE,
        (layout.table_x0, y0),
        (LEFT_COL_W, HOUR_ROW_H),
        GROUP_HEADER,
    );
}

fn draw_row(
    img: &mut RgbImage,
    fonts: &FontSet,
    layout: &Layout,
    row: usize,
    label: &str,
    entry: &HourlyScheduleEntry,
) {
    let y0 = layout.row_y(row);
    rect(
        img,
        (layout.table_x0, y0),
        (layout.table_x0 + LEFT_COL_W, y0 + CELL_H),
        Some(palette::TABLE_BG),
        Some(palette::GRID),
    );
    centered_text(
        img,
        fonts,
        GROUP_FONT_SIZE,
        (layout.table_x0, y0),
        (LEFT_COL_W, CELL_H),
        label,
    );

    for hour in 1..=HOURS_PER_DAY {
        let colors = half_colors(entry.get(hour), entry.prev(hour), entry.next(hour));
        draw_cell(img, layout.cell_x(hour), y0, colors);
    }
}

fn draw_grid_lines(img: &mut RgbImage, layout: &Layout) {
    for i in 0..=HOURS_PER_DAY {
        let x = layout.table_x0 + LEFT_COL_W + i as i32 * CELL_W;
        line(img, (x, layout.hour_y0), (x, layout.table_y1), palette::GRID);
    }
    for r in 0..=layout.rows {
        let y = layout.row_y(r);
        line(img, (layout.table_x0, y), (layout.table_x1, y), palette::GRID);
    }
}

fn draw_legend(img: &mut RgbImage, fonts: &FontSet, layout: &Layout, document: &ScheduleDocument) {
    let y = layout.legend_y();
    let mut x = SPACING;

    for state in LEGEND_STATES {
        let text = document.preset.label_for(state);
        let (w, h) = fonts.measure(FontStyle::Regular, LEGEND_FONT_SIZE, text);

        rect(
            img,
            (x, y),
            (x + LEGEND_BOX, y + LEGEND_BOX),
            Some(CellColor::for_legend(state).rgb()),
            Some(palette::GRID),
        );
        fonts.draw(
            img,
            FontStyle::Regular,
            LEGEND_FONT_SIZE,
            (x + LEGEND_BOX + 4, y + (LEGEND_BOX - h as i32) / 2),
            palette::TEXT,
            text,
        );
        x += LEGEND_BOX + 4 + w as i32 + LEGEND_GAP;
    }
}

fn draw_footer(img: &mut RgbImage, fonts: &FontSet, layout: &Layout, document: &ScheduleDocument) {
    let published = [&document.fact.update, &document.last_updated]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| Utc::now().with_timezone(&LOCAL_TZ).format(DAY_FORMAT).to_string());
    let text = format!("{PUBLISHED_PREFIX} {published}");

    let (w, _) = fonts.measure(FontStyle::Regular, SMALL_FONT_SIZE, &text);
    let x = layout.width as i32 - w as i32 - SPACING;
    let y = layout.legend_y() + LEGEND_BOX + 20;
    fonts.draw(img, FontStyle::Regular, SMALL_FONT_SIZE, (x, y), palette::FOOTER, &text);
}

/// Render the table for `selected` at base resolution.
pub fn render(
    document: &ScheduleDocument,
    selected: &SelectedDate,
    fonts: &FontSet,
) -> Result<RgbImage, RenderError> {
    let day = document.day(&selected.key).ok_or_else(|| {
        RenderError::MissingRequiredFields(format!("fact.data has no entry for '{}'", selected.key))
    })?;

    let groups = display_order(day.keys());
    let layout = Layout::new(groups.len());
    let mut img = RgbImage::from_pixel(layout.width, layout.height, palette::BACKGROUND);

    draw_title(&mut img, fonts, &layout, selected.timestamp);
    rect(
        &mut img,
        (layout.table_x0, layout.table_y0),
        (layout.table_x1, layout.table_y1),
        Some(palette::TABLE_BG),
        Some(palette::GRID),
    );
    draw_hour_header(&mut img, fonts, &layout);

    for (row, group) in groups.iter().enumerate() {
        draw_row(&mut img, fonts, &layout, row, group.label(), &day[*group]);
    }

    draw_grid_lines(&mut img, &layout);
    draw_legend(&mut img, fonts, &layout, document);
    draw_footer(&mut img, fonts, &layout, document);

    Ok(img)
}

/// Scale the base image by [`UPSCALE`] for sharper text.
pub fn upscale(img: &RgbImage) -> RgbImage {
    imageops::resize(
        img,
        img.width() * UPSCALE,
        img.height() * UPSCALE,
        FilterType::Lanczos3,
    )
}

/// Upscale and write an optimized PNG, replacing any previous file.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let scaled = upscale(img);
    let writer = BufWriter::new(File::create(path)?);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
    encoder.write_image(
        scaled.as_raw(),
        scaled.width(),
        scaled.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Select the latest date, render it and save to `path`.
pub fn render_to_file(
    document: &ScheduleDocument,
    fonts: &FontSet,
    path: &Path,
) -> Result<SelectedDate, RenderError> {
    if document.fact.data.is_empty() {
        return Err(RenderError::MissingRequiredFields("fact.data is empty".to_string()));
    }
    let selected = select_target_date(&document.fact.data, Some(document.fact.today))?;
    let img = render(document, &selected, fonts)?;
    save_png(&img, path)?;
    info!(path = %path.display(), date = %format_day(selected.timestamp), "saved schedule image");
    Ok(selected)
}
