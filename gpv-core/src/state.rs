//! Per-hour outage states and their wire names.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Availability of one group during one clock hour.
///
/// A single value can describe at most one half-hour transition; the renderer
/// recovers the other half from the neighbouring hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutageState {
    #[default]
    Available,
    Unavailable,
    PossibleUnavailable,
    UnavailableFirstHalf,
    UnavailableSecondHalf,
    PossibleUnavailableFirstHalf,
    PossibleUnavailableSecondHalf,
    /// Any state string this crate does not know. Rendered as available.
    Unrecognized,
}

impl OutageState {
    /// Every state the publishers can emit, in legend order.
    pub const KNOWN: [OutageState; 7] = [
        OutageState::Available,
        OutageState::Unavailable,
        OutageState::PossibleUnavailable,
        OutageState::UnavailableFirstHalf,
        OutageState::UnavailableSecondHalf,
        OutageState::PossibleUnavailableFirstHalf,
        OutageState::PossibleUnavailableSecondHalf,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            OutageState::Available => "yes",
            OutageState::Unavailable => "no",
            OutageState::PossibleUnavailable => "maybe",
            OutageState::UnavailableFirstHalf => "first",
            OutageState::UnavailableSecondHalf => "second",
            OutageState::PossibleUnavailableFirstHalf => "mfirst",
            OutageState::PossibleUnavailableSecondHalf => "msecond",
            OutageState::Unrecognized => "unknown",
        }
    }

    pub fn from_wire(s: &str) -> Self {
        match s {
            "yes" => OutageState::Available,
            "no" => OutageState::Unavailable,
            "maybe" => OutageState::PossibleUnavailable,
            "first" => OutageState::UnavailableFirstHalf,
            "second" => OutageState::UnavailableSecondHalf,
            "mfirst" => OutageState::PossibleUnavailableFirstHalf,
            "msecond" => OutageState::PossibleUnavailableSecondHalf,
            _ => OutageState::Unrecognized,
        }
    }

    pub fn is_first_half(self) -> bool {
        matches!(
            self,
            OutageState::UnavailableFirstHalf | OutageState::PossibleUnavailableFirstHalf
        )
    }

    pub fn is_second_half(self) -> bool {
        matches!(
            self,
            OutageState::UnavailableSecondHalf | OutageState::PossibleUnavailableSecondHalf
        )
    }

    /// True for the "maybe" family.
    pub fn is_possible(self) -> bool {
        matches!(
            self,
            OutageState::PossibleUnavailable
                | OutageState::PossibleUnavailableFirstHalf
                | OutageState::PossibleUnavailableSecondHalf
        )
    }

    /// Default human label used when a document's preset carries none.
    pub fn default_label(self) -> &'static str {
        match self {
            OutageState::Available => "Світло є",
            OutageState::Unavailable => "Світла немає",
            OutageState::PossibleUnavailable => "Можливе відключення",
            OutageState::UnavailableFirstHalf => "Світла не буде перші 30 хв.",
            OutageState::UnavailableSecondHalf => "Світла не буде другі 30 хв.",
            OutageState::PossibleUnavailableFirstHalf => "Світла можливо не буде перші 30 хв.",
            OutageState::PossibleUnavailableSecondHalf => "Світла можливо не буде другі 30 хв.",
            OutageState::Unrecognized => "Невідомий стан",
        }
    }
}

impl std::fmt::Display for OutageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for OutageState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for OutageState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let state = OutageState::from_wire(&raw);
        if state == OutageState::Unrecognized {
            tracing::warn!(state = %raw, "unrecognized outage state, treating as available");
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for state in OutageState::KNOWN {
            assert_eq!(OutageState::from_wire(state.as_wire()), state);
        }
    }

    #[test]
    fn test_unknown_wire_name() {
        let state: OutageState = serde_json::from_str("\"partly\"").unwrap();
        assert_eq!(state, OutageState::Unrecognized);
        assert_eq!(serde_json::to_string(&state).unwrap(), "\"unknown\"");
    }

    #[test]
    fn test_half_classification() {
        assert!(OutageState::PossibleUnavailableFirstHalf.is_first_half());
        assert!(OutageState::UnavailableSecondHalf.is_second_half());
        assert!(!OutageState::Unavailable.is_first_half());
        assert!(OutageState::PossibleUnavailableSecondHalf.is_possible());
        assert!(!OutageState::UnavailableSecondHalf.is_possible());
    }
}
