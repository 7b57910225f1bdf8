//! Time utilities: date keys and display dates in the publisher's local zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Zone the regional publisher announces schedules in.
pub const LOCAL_TZ: Tz = chrono_tz::Europe::Kyiv;

/// Display format for day titles, e.g. `06.12.2025`.
pub const DAY_FORMAT: &str = "%d.%m.%Y";

/// Display format for update moments, e.g. `06.12.2025 14:03`.
pub const UPDATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Epoch seconds of `date`'s local midnight in `tz`.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> i64 {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| midnight.and_utc().timestamp())
}

/// Date key used in `fact.data` for `date`.
pub fn day_key(date: NaiveDate) -> String {
    local_midnight(date, LOCAL_TZ).to_string()
}

/// Format an epoch timestamp as a local calendar day.
pub fn format_day(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(dt) => dt.with_timezone(&LOCAL_TZ).format(DAY_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

/// Parse a `fact.update` style stamp.
pub fn parse_update_stamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), UPDATE_FORMAT).ok()
}

/// `lastUpdated` form: UTC, ISO-8601 with milliseconds.
pub fn to_iso_millis_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
