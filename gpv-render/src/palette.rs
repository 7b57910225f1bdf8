//! Colours used by the outage table.

use gpv_core::OutageState;
use image::Rgb;

pub const BACKGROUND: Rgb<u8> = Rgb([250, 250, 250]);
pub const TABLE_BG: Rgb<u8> = Rgb([255, 255, 255]);
pub const GRID: Rgb<u8> = Rgb([139, 139, 139]);
pub const TEXT: Rgb<u8> = Rgb([0, 0, 0]);
pub const HEADER_BG: Rgb<u8> = Rgb([245, 247, 250]);
pub const FOOTER: Rgb<u8> = Rgb([140, 140, 140]);

/// Colour class of one half-hour slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    Available,
    Unavailable,
    Possible,
}

impl CellColor {
    pub fn rgb(self) -> Rgb<u8> {
        match self {
            CellColor::Available => Rgb([255, 255, 255]),
            CellColor::Unavailable => Rgb([147, 170, 210]),
            CellColor::Possible => Rgb([255, 220, 115]),
        }
    }

    /// Swatch colour for a legend entry.
    pub fn for_legend(state: OutageState) -> Self {
        match state {
            OutageState::Unavailable
            | OutageState::UnavailableFirstHalf
            | OutageState::UnavailableSecondHalf => CellColor::Unavailable,
            OutageState::PossibleUnavailable
            | OutageState::PossibleUnavailableFirstHalf
            | OutageState::PossibleUnavailableSecondHalf => CellColor::Possible,
            OutageState::Available | OutageState::Unrecognized => CellColor::Available,
        }
    }
}
