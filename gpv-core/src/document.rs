//! Typed schedule document: the persisted JSON shape, validated on load.
//!
//! ```text
//! { "regionId": "...", "lastUpdated": "...",
//!   "fact":   { "data": { "<date-key>": { "<group>": { "1": "yes", ... "24": "no" } } },
//!               "update": "06.12.2025 14:03", "today": 1764972000 },
//!   "preset": { "time_zone": { "1": ["00-01", "00:00", "01:00"], ... },
//!               "time_type": { "yes": "Світло є", ... } } }
//! ```

use std::collections::BTreeMap;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ScheduleError};
use crate::group::Group;
use crate::state::OutageState;

pub const HOURS_PER_DAY: usize = 24;

/// One state per clock hour; hour `h` (1..=24) covers `[h-1, h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HourlyScheduleEntry {
    hours: [OutageState; HOURS_PER_DAY],
}

impl HourlyScheduleEntry {
    /// All 24 hours available.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of hour `h` (1-indexed). Out-of-range hours read as available.
    pub fn get(&self, hour: usize) -> OutageState {
        match hour {
            1..=HOURS_PER_DAY => self.hours[hour - 1],
            _ => OutageState::Available,
        }
    }

    /// # Panics
    ///
    /// Panics if `hour` is outside 1..=24.
    pub fn set(&mut self, hour: usize, state: OutageState) {
        assert!(
            (1..=HOURS_PER_DAY).contains(&hour),
            "hour {hour} outside 1..=24"
        );
        self.hours[hour - 1] = state;
    }

    /// State of the hour before `h`, wrapping 1 -> 24.
    pub fn prev(&self, hour: usize) -> OutageState {
        if hour <= 1 {
            self.get(HOURS_PER_DAY)
        } else {
            self.get(hour - 1)
        }
    }

    /// State of the hour after `h`, wrapping 24 -> 1.
    pub fn next(&self, hour: usize) -> OutageState {
        if hour >= HOURS_PER_DAY {
            self.get(1)
        } else {
            self.get(hour + 1)
        }
    }

    /// `(hour, state)` pairs in hour order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, OutageState)> + '_ {
        self.hours.iter().enumerate().map(|(i, s)| (i + 1, *s))
    }

    pub fn is_fully_available(&self) -> bool {
        self.hours.iter().all(|s| *s == OutageState::Available)
    }
}

impl Serialize for HourlyScheduleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(HOURS_PER_DAY))?;
        for (hour, state) in self.iter() {
            map.serialize_entry(&hour.to_string(), &state)?;
        }
        map.end()
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = HourlyScheduleEntry;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a map of hour keys \"1\"..\"24\" to outage states")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entry = HourlyScheduleEntry::new();
        while let Some((key, state)) = access.next_entry::<String, OutageState>()? {
            let hour: usize = key
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("hour key '{key}' is not a number")))?;
            if !(1..=HOURS_PER_DAY).contains(&hour) {
                return Err(de::Error::custom(format!("hour key {hour} outside 1..=24")));
            }
            entry.set(hour, state);
        }
        Ok(entry)
    }
}

impl<'de> Deserialize<'de> for HourlyScheduleEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(EntryVisitor)
    }
}

/// Group -> hourly states for one date. A group missing here is fully available.
pub type DaySchedule = BTreeMap<Group, HourlyScheduleEntry>;

/// Date key -> day schedule. Keys are epoch seconds of the local midnight.
pub type DateMap = BTreeMap<String, DaySchedule>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub data: DateMap,
    /// Human-formatted moment the publisher last updated the schedule.
    #[serde(default)]
    pub update: String,
    /// Epoch seconds of today's local midnight when the document was built.
    pub today: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preset {
    /// Hour key -> `[label, start, end]`.
    #[serde(default)]
    pub time_zone: BTreeMap<String, Vec<String>>,
    /// State wire name -> human label.
    #[serde(default)]
    pub time_type: BTreeMap<String, String>,
}

impl Preset {
    pub fn standard() -> Self {
        let time_zone = (1..=HOURS_PER_DAY)
            .map(|h| {
                (
                    h.to_string(),
                    vec![
                        format!("{:02}-{:02}", h - 1, h),
                        format!("{:02}:00", h - 1),
                        format!("{:02}:00", h),
                    ],
                )
            })
            .collect();

        let time_type = OutageState::KNOWN
            .iter()
            .map(|s| (s.as_wire().to_string(), s.default_label().to_string()))
            .collect();

        Self {
            time_zone,
            time_type,
        }
    }

    /// Label for a state, preferring the document's own wording.
    pub fn label_for(&self, state: OutageState) -> &str {
        self.time_type
            .get(state.as_wire())
            .map(String::as_str)
            .unwrap_or_else(|| state.default_label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(rename = "regionId", default)]
    pub region_id: String,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: String,
    pub fact: Fact,
    #[serde(default)]
    pub preset: Preset,
}

impl ScheduleDocument {
    /// Validating constructor: fails with `MalformedDocument` on missing or
    /// mistyped `fact`, `fact.data`, `fact.today`, or hour maps.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ScheduleError::MalformedDocument(
                "document root is not an object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn day(&self, key: &str) -> Option<&DaySchedule> {
        self.fact.data.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "regionId": "Zaporizhzhia",
            "lastUpdated": "2025-12-06T12:03:00.000Z",
            "fact": {
                "data": {
                    "1764972000": {
                        "GPV1.1": { "1": "no", "2": "first", "24": "maybe" }
                    }
                },
                "update": "06.12.2025 14:03",
                "today": 1764972000
            },
            "preset": { "time_type": { "yes": "Є світло" } }
        })
    }

    #[test]
    fn test_load_fills_missing_hours() {
        let doc = ScheduleDocument::from_value(sample()).unwrap();
        let day = doc.day("1764972000").unwrap();
        let entry = &day[&Group::new("GPV1.1")];
        assert_eq!(entry.get(1), OutageState::Unavailable);
        assert_eq!(entry.get(2), OutageState::UnavailableFirstHalf);
        assert_eq!(entry.get(3), OutageState::Available);
        assert_eq!(entry.get(24), OutageState::PossibleUnavailable);
    }

    #[test]
    fn test_missing_today_is_malformed() {
        let mut value = sample();
        value["fact"].as_object_mut().unwrap().remove("today");
        let err = ScheduleDocument::from_value(value).unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedDocument(_)));
    }

    #[test]
    fn test_missing_data_is_malformed() {
        let err = ScheduleDocument::from_value(json!({ "fact": { "today": 1 } })).unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedDocument(_)));
    }

    #[test]
    fn test_hour_key_out_of_range_is_malformed() {
        let mut value = sample();
        value["fact"]["data"]["1764972000"]["GPV1.1"]["25"] = json!("no");
        assert!(ScheduleDocument::from_value(value).is_err());
    }

    #[test]
    fn test_serializes_all_hours_in_order() {
        let mut entry = HourlyScheduleEntry::new();
        entry.set(10, OutageState::UnavailableSecondHalf);
        let value = serde_json::to_value(entry).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 24);
        assert_eq!(obj["10"], "second");
        assert_eq!(obj["11"], "yes");
    }

    #[test]
    fn test_neighbours_wrap() {
        let mut entry = HourlyScheduleEntry::new();
        entry.set(24, OutageState::Unavailable);
        entry.set(1, OutageState::PossibleUnavailable);
        assert_eq!(entry.prev(1), OutageState::Unavailable);
        assert_eq!(entry.next(24), OutageState::PossibleUnavailable);
    }

    #[test]
    fn test_preset_labels_fall_back() {
        let doc = ScheduleDocument::from_value(sample()).unwrap();
        assert_eq!(doc.preset.label_for(OutageState::Available), "Є світло");
        assert_eq!(doc.preset.label_for(OutageState::Unavailable), "Світла немає");
    }

    #[test]
    fn test_standard_preset() {
        let preset = Preset::standard();
        assert_eq!(preset.time_zone["1"], vec!["00-01", "00:00", "01:00"]);
        assert_eq!(preset.time_zone["24"], vec!["23-24", "23:00", "24:00"]);
        assert_eq!(preset.time_type.len(), 7);
    }
}
