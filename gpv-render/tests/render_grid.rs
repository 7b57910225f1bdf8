use gpv_core::{ScheduleDocument, SelectedDate};
use gpv_render::layout::{CELL_H, HEADER_H, SPACING, UPSCALE};
use gpv_render::palette;
use gpv_render::{CellColor, FontSet, Layout, RenderError, render, render_to_file};
use image::Rgb;
use serde_json::json;

const DAY: &str = "1765058400";

fn document() -> ScheduleDocument {
    let value = json!({
        "regionId": "Zaporizhzhia",
        "lastUpdated": "2025-12-06T17:12:00.000Z",
        "fact": {
            "today": 1764972000,
            "update": "06.12.2025 19:12",
            "data": {
                "1764972000": {
                    "GPV1.1": { "3": "no" }
                },
                "1765058400": {
                    "GPV2.1": { "10": "first", "11": "yes" },
                    "GPV1.1": { "5": "second", "6": "first" }
                }
            }
        }
    });
    ScheduleDocument::from_value(value).unwrap()
}

fn selected() -> SelectedDate {
    SelectedDate {
        timestamp: 1765058400,
        key: DAY.to_string(),
    }
}

fn pixel(img: &image::RgbImage, x: i32, y: i32) -> Rgb<u8> {
    *img.get_pixel(x as u32, y as u32)
}

#[test]
fn test_canvas_matches_layout() {
    let img = render(&document(), &selected(), &FontSet::none()).unwrap();
    let layout = Layout::new(2);
    assert_eq!((img.width(), img.height()), (layout.width, layout.height));
}

#[test]
fn test_boundary_outage_is_drawn_continuously() {
    let img = render(&document(), &selected(), &FontSet::none()).unwrap();
    let layout = Layout::new(2);
    // GPV1.1 sorts before GPV2.1.
    let y = layout.row_y(0) + CELL_H / 2;

    let off = CellColor::Unavailable.rgb();
    let on = CellColor::Available.rgb();
    assert_eq!(pixel(&img, layout.cell_x(5) + 11, y), on);
    assert_eq!(pixel(&img, layout.cell_x(5) + 33, y), off);
    assert_eq!(pixel(&img, layout.cell_x(6) + 11, y), off);
    assert_eq!(pixel(&img, layout.cell_x(6) + 33, y), on);
}

#[test]
fn test_first_half_before_available_hour() {
    let img = render(&document(), &selected(), &FontSet::none()).unwrap();
    let layout = Layout::new(2);
    let y = layout.row_y(1) + CELL_H / 2;

    assert_eq!(pixel(&img, layout.cell_x(10) + 11, y), CellColor::Unavailable.rgb());
    assert_eq!(pixel(&img, layout.cell_x(10) + 33, y), CellColor::Available.rgb());
    assert_eq!(pixel(&img, layout.cell_x(11) + 22, y), CellColor::Available.rgb());
}

#[test]
fn test_missing_date_is_rejected() {
    let sel = SelectedDate {
        timestamp: 0,
        key: "42".to_string(),
    };
    let err = render(&document(), &sel, &FontSet::none()).unwrap_err();
    assert!(matches!(err, RenderError::MissingRequiredFields(_)));
}

#[test]
fn test_saved_png_is_upscaled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("images").join("gpv-all-today.png");

    let chosen = render_to_file(&document(), &FontSet::none(), &path).unwrap();
    assert_eq!(chosen.key, DAY);

    let (w, h) = image::image_dimensions(&path).unwrap();
    let layout = Layout::new(2);
    assert_eq!((w, h), (layout.width * UPSCALE, layout.height * UPSCALE));
}

#[test]
fn test_empty_document_cannot_render() {
    let mut doc = document();
    doc.fact.data.clear();
    let dir = tempfile::tempdir().unwrap();
    let err = render_to_file(&doc, &FontSet::none(), &dir.path().join("x.png")).unwrap_err();
    assert!(matches!(err, RenderError::MissingRequiredFields(_)));
}

#[test]
fn test_title_is_drawn_with_bundled_font() {
    let img = render(&document(), &selected(), &FontSet::bundled()).unwrap();
    let inked = (SPACING..SPACING + HEADER_H + 6)
        .flat_map(|y| (0..img.width()).map(move |x| (x, y as u32)))
        .filter(|&(x, y)| *img.get_pixel(x, y) != palette::BACKGROUND)
        .count();
    assert!(inked > 100, "title band has {inked} inked pixels");
}

#[test]
fn test_shapes_only_without_fonts() {
    let img = render(&document(), &selected(), &FontSet::none()).unwrap();
    let title_row_clean = (0..img.width())
        .all(|x| *img.get_pixel(x, (SPACING + 20) as u32) == palette::BACKGROUND);
    assert!(title_row_clean);
}
