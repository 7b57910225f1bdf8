//! Half-hour colour inference for one table cell.
//!
//! The encoder keeps a single state per hour, so an outage crossing an hour
//! boundary is stored as a second-half mark on one hour and a first-half mark on
//! the next. A half state only says which half of *its own* hour is off; the
//! colour of the other half is recovered from the neighbouring hour.

use gpv_core::OutageState;

use crate::palette::CellColor;

/// Colour of the right half of a first-half cell, looked up from the next hour.
fn right_after_first(next: OutageState) -> CellColor {
    match next {
        OutageState::Unavailable => CellColor::Unavailable,
        OutageState::PossibleUnavailable => CellColor::Possible,
        OutageState::UnavailableFirstHalf => CellColor::Unavailable,
        OutageState::PossibleUnavailableFirstHalf => CellColor::Possible,
        _ => CellColor::Available,
    }
}

/// Colour of the left half of a second-half cell, looked up from the previous hour.
fn left_before_second(prev: OutageState) -> CellColor {
    match prev {
        OutageState::Unavailable => CellColor::Unavailable,
        OutageState::PossibleUnavailable => CellColor::Possible,
        OutageState::UnavailableSecondHalf => CellColor::Unavailable,
        OutageState::PossibleUnavailableSecondHalf => CellColor::Possible,
        _ => CellColor::Available,
    }
}

/// Right half of a "maybe" first-half cell: any half-marked neighbour reads as off.
fn right_after_possible_first(next: OutageState) -> CellColor {
    match next {
        OutageState::Unavailable => CellColor::Unavailable,
        OutageState::PossibleUnavailable => CellColor::Possible,
        s if s.is_first_half() || s.is_second_half() => CellColor::Unavailable,
        _ => CellColor::Available,
    }
}

/// Left half of a "maybe" second-half cell.
fn left_before_possible_second(prev: OutageState) -> CellColor {
    match prev {
        OutageState::Unavailable => CellColor::Unavailable,
        OutageState::PossibleUnavailable => CellColor::Possible,
        s if s.is_first_half() || s.is_second_half() => CellColor::Unavailable,
        _ => CellColor::Available,
    }
}

/// `(left, right)` colours for an hour given its own and neighbouring states.
pub fn half_colors(state: OutageState, prev: OutageState, next: OutageState) -> (CellColor, CellColor) {
    match state {
        OutageState::Available => (CellColor::Available, CellColor::Available),
        OutageState::Unavailable => (CellColor::Unavailable, CellColor::Unavailable),
        OutageState::PossibleUnavailable => (CellColor::Possible, CellColor::Possible),
        OutageState::UnavailableFirstHalf => (CellColor::Unavailable, right_after_first(next)),
        OutageState::UnavailableSecondHalf => (left_before_second(prev), CellColor::Unavailable),
        OutageState::PossibleUnavailableFirstHalf => {
            (CellColor::Possible, right_after_possible_first(next))
        }
        OutageState::PossibleUnavailableSecondHalf => {
            (left_before_possible_second(prev), CellColor::Possible)
        }
        OutageState::Unrecognized => (CellColor::Available, CellColor::Available),
    }
}
