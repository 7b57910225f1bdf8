//! Pick the date a document should be rendered for.

use tracing::{debug, info};

use crate::document::DaySchedule;
use crate::error::{Result, ScheduleError};
use crate::time::format_day;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDate {
    /// Epoch seconds of the selected day's local midnight.
    pub timestamp: i64,
    /// Key into `fact.data`.
    pub key: String,
}

/// Select the latest published date.
///
/// With several keys the numerically largest wins, so tomorrow's schedule beats
/// today's once it is out. If any key is not an integer, keys are compared as
/// strings instead. A non-numeric winner takes its timestamp from `today`.
pub fn select_target_date(
    data: &BTreeMap<String, DaySchedule>,
    today: Option<i64>,
) -> Result<SelectedDate> {
    let keys: Vec<&String> = data.keys().collect();

    let key = match keys.as_slice() {
        [] => return Err(ScheduleError::EmptyDateSet),
        [only] => (*only).clone(),
        many => {
            debug!(count = many.len(), keys = ?many, "several dates published");
            let numeric: Option<Vec<(i64, &String)>> = many
                .iter()
                .map(|k| k.trim().parse::<i64>().ok().map(|n| (n, *k)))
                .collect();
            match numeric {
                Some(parsed) => parsed
                    .into_iter()
                    .max_by_key(|(n, _)| *n)
                    .map(|(_, k)| k.clone())
                    .ok_or(ScheduleError::EmptyDateSet)?,
                // BTreeMap keys are already in string order.
                None => many[many.len() - 1].clone(),
            }
        }
    };

    let timestamp = match key.trim().parse::<i64>() {
        Ok(ts) => ts,
        Err(_) => today.ok_or_else(|| ScheduleError::InvalidDateKey(key.clone()))?,
    };

    info!(key = %key, date = %format_day(timestamp), "selected date");
    Ok(SelectedDate { timestamp, key })
}
