//! Zaporizhzhiaoblenergo announcement page parser (flattened text)
//!
//! Expected page text, one or more dated sections:
//!   ОНОВЛЕНО ГПВ НА 06 ГРУДНЯ (оновлено о 14:03)
//!   ...
//!   Години відсутності електропостачання:
//!   1.1: 05:30 – 10:30, 14:00 – 17:00
//!   1.2: не вимикається
//!
//! or, for the first publication of a day:
//!   06 ГРУДНЯ ПО ЗАПОРІЗЬКІЙ ОБЛАСТІ ДІЯТИМУТЬ ГПВ

use std::collections::HashSet;

use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use gpv_core::{Group, Interval};
use regex::{Captures, Regex};
use tracing::{debug, info, warn};

use crate::types::{DateBlock, GroupLine, HeaderKind};

/// Genitive month names as printed in headers.
const MONTHS: [(&str, u32); 12] = [
    ("СІЧНЯ", 1),
    ("ЛЮТОГО", 2),
    ("БЕРЕЗНЯ", 3),
    ("КВІТНЯ", 4),
    ("ТРАВНЯ", 5),
    ("ЧЕРВНЯ", 6),
    ("ЛИПНЯ", 7),
    ("СЕРПНЯ", 8),
    ("ВЕРЕСНЯ", 9),
    ("ЖОВТНЯ", 10),
    ("ЛИСТОПАДА", 11),
    ("ГРУДНЯ", 12),
];

/// Block length when no further header follows, in characters.
const TRAILING_BLOCK_CHARS: usize = 5000;

fn month_number(name: &str) -> Option<u32> {
    let upper = name.to_uppercase();
    MONTHS.iter().find(|(m, _)| *m == upper).map(|(_, n)| *n)
}

fn header_regex() -> Result<Regex> {
    let months = MONTHS.iter().map(|(m, _)| *m).collect::<Vec<_>>().join("|");
    let pattern = format!(
        concat!(
            r"(?i)(?:",
            r"ОНОВЛЕНО\s+ГПВ\s+НА\s+(?P<u_day>\d{{1,2}})\s+(?P<u_month>{months})",
            r"[^\n]*?оновлено\s+о?\s*(?P<u_hour>\d{{1,2}})[:\-](?P<u_min>\d{{2}})",
            r"|",
            r"(?P<a_day>\d{{1,2}})\s+(?P<a_month>{months})\s+ПО\s+ЗАПОРІЗЬКІЙ\s+ОБЛАСТІ\s+ДІЯТИМУТЬ\s+ГПВ",
            r")"
        ),
        months = months
    );
    Ok(Regex::new(&pattern)?)
}

/// Convert `HH:MM` into fractional hours. Accepts `24:00`.
pub fn time_to_hour(hhmm: &str) -> Option<f64> {
    let (hh, mm) = hhmm.trim().split_once(':')?;
    let hh: u32 = hh.parse().ok()?;
    let mm: u32 = mm.parse().ok()?;
    if mm >= 60 || hh > 24 || (hh == 24 && mm != 0) {
        return None;
    }
    Some(hh as f64 + mm as f64 / 60.0)
}

/// Byte offset `n` characters after `start`, clamped to the end of `text`.
fn advance_chars(text: &str, start: usize, n: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| start + i)
        .unwrap_or(text.len())
}

/// Resolve a header's day/month against today, handling the year rollover for
/// tomorrow. Returns `None` unless the date is today or tomorrow.
fn resolve_date(day: u32, month: u32, today: NaiveDate) -> Option<NaiveDate> {
    let tomorrow = today.checked_add_days(Days::new(1))?;
    [today.year(), tomorrow.year()]
        .into_iter()
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|d| *d == today || *d == tomorrow)
}

fn header_date(caps: &Captures, today: NaiveDate) -> Option<(NaiveDate, HeaderKind, Option<NaiveTime>)> {
    let (day, month, kind, updated_at) = if let Some(day) = caps.name("u_day") {
        let updated_at = match (caps.name("u_hour"), caps.name("u_min")) {
            (Some(h), Some(m)) => NaiveTime::from_hms_opt(
                h.as_str().parse().ok()?,
                m.as_str().parse().ok()?,
                0,
            ),
            _ => None,
        };
        (day, caps.name("u_month")?, HeaderKind::Updated, updated_at)
    } else {
        (caps.name("a_day")?, caps.name("a_month")?, HeaderKind::Announced, None)
    };

    let day: u32 = day.as_str().parse().ok()?;
    let month = month_number(month.as_str())?;
    let date = resolve_date(day, month, today)?;
    Some((date, kind, updated_at))
}

/// Split page text into dated blocks for today and tomorrow.
///
/// The first block that yields at least one group wins for its date; later
/// headers for the same date are ignored.
pub fn find_date_blocks(text: &str, today: NaiveDate) -> Result<Vec<DateBlock>> {
    let header_re = header_regex()?;
    let headers: Vec<Captures> = header_re.captures_iter(text).collect();

    let mut processed: HashSet<NaiveDate> = HashSet::new();
    let mut out = Vec::new();

    for (i, caps) in headers.iter().enumerate() {
        let Some(whole) = caps.get(0) else { continue };
        let Some((date, kind, updated_at)) = header_date(caps, today) else {
            continue;
        };

        if processed.contains(&date) {
            debug!(%date, ?kind, "date already processed");
            continue;
        }

        let block_end = match headers.get(i + 1).and_then(|c| c.get(0)) {
            Some(next) => next.start(),
            None => advance_chars(text, whole.start(), TRAILING_BLOCK_CHARS),
        };
        let block = &text[whole.start()..block_end];
        info!(%date, ?kind, ?updated_at, chars = block.chars().count(), "processing block");

        let lines = parse_schedule_block(block)?;
        if lines.is_empty() {
            warn!(%date, "no schedules found in block");
            continue;
        }

        processed.insert(date);
        out.push(DateBlock {
            date,
            kind,
            updated_at,
            lines,
        });
    }

    Ok(out)
}

/// Parse group lines of one block.
///
/// Groups announced as never disconnected are left out entirely; the document
/// treats a missing group as available all day.
pub fn parse_schedule_block(block: &str) -> Result<Vec<GroupLine>> {
    let start_re = Regex::new(r"(?i)Години\s+відсутності\s+електропостачання")?;
    let line_re = Regex::new(r"^([0-9])\.([0-9])\s*:\s*(.+)")?;
    let interval_re = Regex::new(r"([0-9]{1,2}:[0-9]{2})\s*[–\-—]\s*([0-9]{1,2}:[0-9]{2})")?;

    let body = match start_re.find(block) {
        Some(m) => &block[m.end()..],
        None => block,
    };

    let mut out = Vec::new();
    for line in body.lines() {
        let line = line.trim();
        let Some(caps) = line_re.captures(line) else {
            continue;
        };

        let (Ok(major), Ok(minor)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            continue;
        };
        let group = Group::from_queue(major, minor);
        let content = &caps[3];

        let lowered = content.to_lowercase();
        if lowered.contains("не вимикається") || lowered.contains("не вимикаються") {
            debug!(%group, "not disconnected");
            continue;
        }

        let mut intervals = Vec::new();
        for m in interval_re.captures_iter(content) {
            let (Some(start), Some(mut end)) = (time_to_hour(&m[1]), time_to_hour(&m[2])) else {
                debug!(%group, range = &m[0], "unparseable time range");
                continue;
            };
            // A range ending before it starts crosses midnight ("23:30 – 00:30");
            // only the part up to 24:00 belongs to this date.
            if end < start {
                end = 24.0;
            }
            match Interval::new(start, end) {
                Some(interval) => intervals.push(interval),
                None => debug!(%group, range = &m[0], "skipping out-of-order range"),
            }
        }

        if !intervals.is_empty() {
            debug!(%group, count = intervals.len(), "parsed intervals");
        }
        out.push(GroupLine { group, intervals });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 6).unwrap()
    }

    #[test]
    fn test_time_to_hour() {
        assert_eq!(time_to_hour("05:30"), Some(5.5));
        assert_eq!(time_to_hour("9:15"), Some(9.25));
        assert_eq!(time_to_hour("24:00"), Some(24.0));
        assert_eq!(time_to_hour("24:30"), None);
        assert_eq!(time_to_hour("10:75"), None);
        assert_eq!(time_to_hour("ab:00"), None);
    }

    #[test]
    fn test_parse_block_lines() {
        let block = r#"
ОНОВЛЕНО ГПВ НА 06 ГРУДНЯ (оновлено о 14:03)
Шановні споживачі! 1.1: це не рядок графіка
Години відсутності електропостачання:
1.1: 05:30 – 10:30, 14:00 - 17:00
1.2: не вимикається
2.1: 22:00 — 00:00
2.2: 23:30 – 00:30
3.1: 12:00 – 12:00
"#;
        let lines = parse_schedule_block(block).unwrap();
        assert_eq!(lines.len(), 4);

        assert_eq!(lines[0].group, Group::new("GPV1.1"));
        assert_eq!(
            lines[0].intervals,
            vec![
                Interval::new(5.5, 10.5).unwrap(),
                Interval::new(14.0, 17.0).unwrap()
            ]
        );

        assert_eq!(lines[1].group, Group::new("GPV2.1"));
        assert_eq!(lines[1].intervals, vec![Interval::new(22.0, 24.0).unwrap()]);

        assert_eq!(lines[2].group, Group::new("GPV2.2"));
        assert_eq!(lines[2].intervals, vec![Interval::new(23.5, 24.0).unwrap()]);

        // Empty range is dropped but the group still exists.
        assert_eq!(lines[3].group, Group::new("GPV3.1"));
        assert!(lines[3].intervals.is_empty());
    }

    #[test]
    fn test_last_block_is_bounded() {
        let head = "06 ГРУДНЯ ПО ЗАПОРІЗЬКІЙ ОБЛАСТІ ДІЯТИМУТЬ ГПВ\n\
                    Години відсутності електропостачання:\n\
                    1.1: 08:00 – 09:00\n";
        let filler = "ї".repeat(TRAILING_BLOCK_CHARS);
        let text = format!("{head}{filler}\n1.2: 10:00 – 11:00\n");

        let blocks = find_date_blocks(&text, today()).unwrap();
        assert_eq!(blocks.len(), 1);
        let groups: Vec<_> = blocks[0].lines.iter().map(|l| l.group.clone()).collect();
        assert_eq!(groups, vec![Group::new("GPV1.1")]);
    }

    #[test]
    fn test_advance_chars_counts_characters() {
        let text = "аб cd";
        assert_eq!(advance_chars(text, 0, 2), "аб".len());
        assert_eq!(advance_chars(text, 0, 100), text.len());
    }

    #[test]
    fn test_find_blocks_today_and_tomorrow() {
        let text = r#"
ОНОВЛЕНО ГПВ НА 07 ГРУДНЯ (оновлено о 18:40)
Години відсутності електропостачання:
1.1: 00:00 – 02:00
06 грудня по Запорізькій області діятимуть ГПВ
1.1: 08:00 – 09:30
1.2: 09:30 – 11:00
05 ГРУДНЯ ПО ЗАПОРІЗЬКІЙ ОБЛАСТІ ДІЯТИМУТЬ ГПВ
1.1: 10:00 – 12:00
"#;
        let blocks = find_date_blocks(text, today()).unwrap();
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].date, NaiveDate::from_ymd_opt(2025, 12, 7).unwrap());
        assert_eq!(blocks[0].kind, HeaderKind::Updated);
        assert_eq!(blocks[0].updated_at, NaiveTime::from_hms_opt(18, 40, 0));
        assert_eq!(blocks[0].lines.len(), 1);

        assert_eq!(blocks[1].date, today());
        assert_eq!(blocks[1].kind, HeaderKind::Announced);
        assert_eq!(blocks[1].updated_at, None);
        assert_eq!(blocks[1].lines.len(), 2);
    }

    #[test]
    fn test_first_non_empty_block_wins() {
        let text = r#"
ОНОВЛЕНО ГПВ НА 06 ГРУДНЯ (оновлено о 10:00)
Графік уточнюється.
ОНОВЛЕНО ГПВ НА 06 ГРУДНЯ (оновлено о 09:00)
1.1: 01:00 – 02:00
ОНОВЛЕНО ГПВ НА 06 ГРУДНЯ (оновлено о 08:00)
1.1: 03:00 – 04:00
"#;
        let blocks = find_date_blocks(text, today()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].updated_at, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(blocks[0].lines[0].intervals, vec![Interval::new(1.0, 2.0).unwrap()]);
    }

    #[test]
    fn test_tomorrow_across_new_year() {
        let dec31 = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let text = "01 СІЧНЯ ПО ЗАПОРІЗЬКІЙ ОБЛАСТІ ДІЯТИМУТЬ ГПВ\n3.1: 12:00 – 13:00\n";
        let blocks = find_date_blocks(text, dec31).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_no_headers() {
        assert!(find_date_blocks("1.1: 05:00 – 06:00", today()).unwrap().is_empty());
    }
}
