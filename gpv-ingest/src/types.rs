use chrono::{NaiveDate, NaiveTime};
use gpv_core::{Group, Interval};
use serde::{Deserialize, Serialize};

/// Which header shape introduced a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderKind {
    /// "ОНОВЛЕНО ГПВ НА 06 ГРУДНЯ (оновлено о 14:03)"
    Updated,
    /// "06 ГРУДНЯ ПО ЗАПОРІЗЬКІЙ ОБЛАСТІ ДІЯТИМУТЬ ГПВ"
    Announced,
}

/// Intervals read from one `<d>.<d>: ...` line, in announcement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLine {
    pub group: Group,
    pub intervals: Vec<Interval>,
}

/// One dated section of the announcement page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateBlock {
    pub date: NaiveDate,
    pub kind: HeaderKind,
    /// Update time printed in the header, if any.
    pub updated_at: Option<NaiveTime>,
    pub lines: Vec<GroupLine>,
}
