//! Table geometry at base resolution (before upscaling).

use gpv_core::HOURS_PER_DAY;

pub const CELL_W: i32 = 44;
pub const CELL_H: i32 = 36;
pub const LEFT_COL_W: i32 = 140;
pub const HEADER_H: i32 = 34;
pub const SPACING: i32 = 60;
pub const LEGEND_H: i32 = 60;
pub const HOUR_ROW_H: i32 = 90;
/// Gap between the title area and the hour header row.
pub const HEADER_SPACING: i32 = 35;
/// Vertical gap between the three lines of an hour label.
pub const HOUR_LINE_GAP: i32 = 15;
/// Extra bottom room for the footer line.
pub const FOOTER_H: i32 = 40;

pub const TITLE_FONT_SIZE: f32 = 34.0;
pub const HOUR_FONT_SIZE: f32 = 15.0;
pub const GROUP_FONT_SIZE: f32 = 20.0;
pub const SMALL_FONT_SIZE: f32 = 16.0;
pub const LEGEND_FONT_SIZE: f32 = 14.0;

pub const LEGEND_BOX: i32 = 18;
pub const LEGEND_GAP: i32 = 15;

/// Output is written at this multiple of the base size.
pub const UPSCALE: u32 = 3;

/// Positions derived from the number of table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub width: u32,
    pub height: u32,
    pub table_x0: i32,
    pub table_y0: i32,
    pub table_x1: i32,
    pub table_y1: i32,
    pub hour_y0: i32,
}

impl Layout {
    /// An empty table still gets one blank row.
    pub fn new(rows: usize) -> Self {
        let rows = rows.max(1);
        let hours = HOURS_PER_DAY as i32;
        let body_h = rows as i32 * CELL_H;

        let width = SPACING * 2 + LEFT_COL_W + hours * CELL_W;
        let height = SPACING * 2 + HEADER_H + HOUR_ROW_H + body_h + LEGEND_H + FOOTER_H;

        let table_x0 = SPACING;
        let table_y0 = SPACING + HEADER_H + HOUR_ROW_H + HEADER_SPACING;

        Self {
            rows,
            width: width as u32,
            height: height as u32,
            table_x0,
            table_y0,
            table_x1: table_x0 + LEFT_COL_W + hours * CELL_W,
            table_y1: table_y0 + body_h,
            hour_y0: table_y0 - HOUR_ROW_H,
        }
    }

    /// Width spanned by the label column and the hour columns.
    pub fn table_width(&self) -> i32 {
        self.table_x1 - self.table_x0
    }

    /// Left edge of hour column `hour` (1..=24).
    pub fn cell_x(&self, hour: usize) -> i32 {
        self.table_x0 + LEFT_COL_W + (hour as i32 - 1) * CELL_W
    }

    /// Top edge of body row `row` (0-based).
    pub fn row_y(&self, row: usize) -> i32 {
        self.table_y0 + row as i32 * CELL_H
    }

    pub fn legend_y(&self) -> i32 {
        self.table_y1 + 15
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let layout = Layout::new(12);
        assert_eq!(layout.width, 1316);
        assert_eq!(layout.height as i32, 120 + 34 + 90 + 12 * 36 + 60 + 40);
        assert_eq!(layout.cell_x(1), 200);
        assert_eq!(layout.cell_x(24), 200 + 23 * 44);
        assert_eq!(layout.table_x1, layout.cell_x(24) + CELL_W);
    }

    #[test]
    fn test_footer_fits_inside_canvas() {
        for rows in [0, 1, 12, 40] {
            let layout = Layout::new(rows);
            let footer_bottom = layout.legend_y() + LEGEND_BOX + 20 + SMALL_FONT_SIZE as i32;
            assert!(footer_bottom < layout.height as i32, "rows={rows}");
        }
    }

    #[test]
    fn test_empty_table_has_one_row() {
        assert_eq!(Layout::new(0).rows, 1);
    }
}
