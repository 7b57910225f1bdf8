//! Compile continuous outage intervals onto the fixed 24-hour grid.
//!
//! Hour `h` covers `[h-1, h)` with its midpoint at `h-0.5`. Interval times are
//! bucketed as given, without any offset: an interval at `10:45-11:15` marks the
//! second half of hour 11 and the first half of hour 12.
//!
//! Intervals are applied in input order and each affected hour takes the state
//! computed from the *current* interval only. Two intervals that separately cover
//! the two halves of one hour therefore leave only the later half marked.

use serde::{Deserialize, Serialize};

use crate::document::{DaySchedule, HOURS_PER_DAY, HourlyScheduleEntry};
use crate::group::Group;
use crate::state::OutageState;

/// A half-open outage interval in fractional clock hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    /// `None` unless `0 <= start < end <= 24`.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if start.is_finite() && end.is_finite() && 0.0 <= start && start < end && end <= 24.0 {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

/// State hour `hour` takes from a single interval, or `None` if untouched.
fn hour_state(hour: usize, interval: Interval) -> Option<OutageState> {
    let h_start = hour as f64 - 1.0;
    let h_mid = hour as f64 - 0.5;
    let h_end = hour as f64;
    let Interval { start: t1, end: t2 } = interval;

    let first_half_off = t1 < h_mid && t2 > h_start;
    let second_half_off = t1 < h_end && t2 > h_mid;

    match (first_half_off, second_half_off) {
        (true, true) => Some(OutageState::Unavailable),
        (true, false) => Some(OutageState::UnavailableFirstHalf),
        (false, true) => Some(OutageState::UnavailableSecondHalf),
        (false, false) => None,
    }
}

/// Overwrite the hours `interval` touches.
pub fn apply_interval(entry: &mut HourlyScheduleEntry, interval: Interval) {
    for hour in 1..=HOURS_PER_DAY {
        if let Some(state) = hour_state(hour, interval) {
            entry.set(hour, state);
        }
    }
}

/// Encode one group's intervals into a fresh, fully available entry.
pub fn encode(intervals: &[Interval]) -> HourlyScheduleEntry {
    let mut entry = HourlyScheduleEntry::new();
    for interval in intervals {
        apply_interval(&mut entry, *interval);
    }
    entry
}

/// Accumulates entries for every group of one date.
#[derive(Debug, Clone, Default)]
pub struct ScheduleEncoder {
    day: DaySchedule,
}

impl ScheduleEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `intervals` to `group`, creating a fully available entry first if
    /// the group is new. Returns the group's entry after the update.
    pub fn encode(&mut self, group: Group, intervals: &[Interval]) -> &HourlyScheduleEntry {
        let entry = self.day.entry(group).or_default();
        for interval in intervals {
            apply_interval(entry, *interval);
        }
        entry
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_empty()
    }

    pub fn len(&self) -> usize {
        self.day.len()
    }

    pub fn finish(self) -> DaySchedule {
        self.day
    }
}
