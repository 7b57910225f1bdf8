//! gpv-core: schedule data model, interval encoder, date selection and change detection

pub mod date_select;
pub mod differ;
pub mod document;
pub mod encoder;
pub mod error;
pub mod group;
pub mod state;
pub mod time;

pub use date_select::{select_target_date, SelectedDate};
pub use differ::{diff_documents, has_changed, UpdateOutcome};
pub use document::{
    DateMap, DaySchedule, Fact, HourlyScheduleEntry, Preset, ScheduleDocument, HOURS_PER_DAY,
};
pub use encoder::{apply_interval, encode, Interval, ScheduleEncoder};
pub use error::{Result, ScheduleError};
pub use group::{display_order, Group, GroupSortKey};
pub use state::OutageState;
