//! Font loading with fallback. A missing font never fails a render: the
//! configured path is tried first, then common system locations, then the
//! DejaVu Sans copy compiled into the crate.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, warn};

pub const DEFAULT_REGULAR_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";
pub const DEFAULT_BOLD_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// Tried after the configured path, in order.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// DejaVu Sans, covers Cyrillic.
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

pub struct FontSet {
    regular: Option<FontVec>,
    bold: Option<FontVec>,
}

fn load_font(path: &Path) -> Option<FontVec> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "font not readable");
            return None;
        }
    };
    match FontVec::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid font file");
            None
        }
    }
}

fn load_first(candidates: impl IntoIterator<Item = PathBuf>) -> Option<FontVec> {
    candidates.into_iter().find_map(|p| load_font(&p))
}

fn load_bundled() -> Option<FontVec> {
    match FontVec::try_from_vec(BUNDLED_FONT.to_vec()) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!(error = %e, "bundled font is unreadable");
            None
        }
    }
}

impl FontSet {
    /// Load the preferred fonts, falling back to common system locations.
    pub fn load(regular: Option<&Path>, bold: Option<&Path>) -> Self {
        let preferred_regular = regular
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REGULAR_FONT));
        let preferred_bold = bold
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BOLD_FONT));

        let regular = load_first(
            std::iter::once(preferred_regular.clone())
                .chain(FALLBACK_FONTS.iter().map(PathBuf::from)),
        )
        .or_else(|| {
            warn!(
                preferred = %preferred_regular.display(),
                "no system font found; using bundled DejaVu Sans"
            );
            load_bundled()
        });

        let bold = load_font(&preferred_bold);
        if bold.is_none() {
            warn!(preferred = %preferred_bold.display(), "bold font unavailable; using regular");
        }

        Self { regular, bold }
    }

    /// Only the compiled-in font, for both styles.
    pub fn bundled() -> Self {
        Self {
            regular: load_bundled(),
            bold: None,
        }
    }

    /// No fonts at all; only shapes are drawn.
    pub fn none() -> Self {
        Self {
            regular: None,
            bold: None,
        }
    }

    pub fn has_text(&self) -> bool {
        self.regular.is_some() || self.bold.is_some()
    }

    fn pick(&self, style: FontStyle) -> Option<&FontVec> {
        match style {
            FontStyle::Bold => self.bold.as_ref().or(self.regular.as_ref()),
            FontStyle::Regular => self.regular.as_ref().or(self.bold.as_ref()),
        }
    }

    /// Rendered `(width, height)` of `text`; zero when no font is loaded.
    pub fn measure(&self, style: FontStyle, size: f32, text: &str) -> (u32, u32) {
        match self.pick(style) {
            Some(font) => text_size(PxScale::from(size), font, text),
            None => (0, 0),
        }
    }

    pub fn draw(
        &self,
        img: &mut RgbImage,
        style: FontStyle,
        size: f32,
        (x, y): (i32, i32),
        color: Rgb<u8>,
        text: &str,
    ) {
        if let Some(font) = self.pick(style) {
            draw_text_mut(img, color, x, y, PxScale::from(size), font, text);
        }
    }
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("regular", &self.regular.is_some())
            .field("bold", &self.bold.is_some())
            .finish()
    }
}
