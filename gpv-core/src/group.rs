//! Rotation-queue identifiers and their display ordering.

use serde::{Deserialize, Serialize};

const GROUP_PREFIX: &str = "GPV";

/// A rotation queue, e.g. `GPV1.1`.
///
/// Map ordering uses the raw identifier; display ordering uses [`Group::sort_key`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(String);

/// Display ordering: numeric queues first by (major, minor, remainder), then
/// everything else by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupSortKey {
    Numeric { major: u32, minor: u32, rest: String },
    Named(String),
}

impl Group {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the identifier used by the regional publisher from `major.minor`.
    pub fn from_queue(major: u32, minor: u32) -> Self {
        Self(format!("{GROUP_PREFIX}{major}.{minor}"))
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// Identifier without the publisher prefix, used as the row label.
    pub fn label(&self) -> &str {
        self.0
            .strip_prefix(GROUP_PREFIX)
            .unwrap_or(&self.0)
            .trim()
    }

    pub fn sort_key(&self) -> GroupSortKey {
        let label = self.label();
        let digits_end = label
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(label.len());
        let Ok(major) = label[..digits_end].parse::<u32>() else {
            return GroupSortKey::Named(self.0.clone());
        };

        let rest = &label[digits_end..];
        if let Some(after_dot) = rest.strip_prefix('.') {
            let minor_end = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            if let Ok(minor) = after_dot[..minor_end].parse::<u32>() {
                return GroupSortKey::Numeric {
                    major,
                    minor,
                    rest: after_dot[minor_end..].to_string(),
                };
            }
        }

        GroupSortKey::Numeric {
            major,
            minor: 0,
            rest: rest.to_string(),
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Group {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Sort groups for display.
pub fn display_order<'a>(groups: impl IntoIterator<Item = &'a Group>) -> Vec<&'a Group> {
    let mut out: Vec<&Group> = groups.into_iter().collect();
    out.sort_by_cached_key(|g| g.sort_key());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strips_prefix() {
        assert_eq!(Group::new("GPV3.2").label(), "3.2");
        assert_eq!(Group::new("reserve").label(), "reserve");
    }

    #[test]
    fn test_numeric_before_named() {
        let groups = [
            Group::new("reserve"),
            Group::new("GPV10.1"),
            Group::new("GPV2.2"),
            Group::new("alpha"),
            Group::new("GPV2.1"),
        ];
        let ordered: Vec<&str> = display_order(groups.iter()).iter().map(|g| g.id()).collect();
        assert_eq!(ordered, vec!["GPV2.1", "GPV2.2", "GPV10.1", "alpha", "reserve"]);
    }

    #[test]
    fn test_from_queue() {
        assert_eq!(Group::from_queue(4, 2).id(), "GPV4.2");
    }
}
