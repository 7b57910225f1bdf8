//! gpv-render: draws the hourly outage table for one date as a PNG.

pub mod cell;
pub mod error;
pub mod fonts;
pub mod grid;
pub mod layout;
pub mod palette;

pub use cell::half_colors;
pub use error::RenderError;
pub use fonts::{FontSet, FontStyle};
pub use grid::{DEFAULT_OUTPUT_PATH, render, render_to_file, save_png, upscale};
pub use layout::Layout;
pub use palette::CellColor;
