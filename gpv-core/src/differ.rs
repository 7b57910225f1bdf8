//! Structural change detection between the persisted and a freshly built document.

use serde_json::Value;

use crate::document::{DateMap, ScheduleDocument};

/// Result of comparing a fresh document with the persisted one.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum UpdateOutcome {
    /// The schedule data is identical; nothing should be written.
    Unchanged,
    /// The schedule data differs (or nothing was persisted yet).
    Updated(ScheduleDocument),
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated(_))
    }
}

/// Sorted-key JSON form of the per-date data.
///
/// `serde_json::Map` is ordered, so serialization order never depends on how
/// the maps were filled.
fn canonical(data: &DateMap) -> Value {
    serde_json::to_value(data).unwrap_or(Value::Null)
}

/// Whether any `(date, group, hour)` state differs. Update timestamps and
/// legend metadata are not part of the data map and never count.
pub fn has_changed(previous: &DateMap, candidate: &DateMap) -> bool {
    canonical(previous) != canonical(candidate)
}

/// Compare whole documents by their `fact.data` only.
pub fn diff_documents(previous: Option<&ScheduleDocument>, candidate: ScheduleDocument) -> UpdateOutcome {
    match previous {
        Some(prev) if !has_changed(&prev.fact.data, &candidate.fact.data) => UpdateOutcome::Unchanged,
        _ => UpdateOutcome::Updated(candidate),
    }
}
