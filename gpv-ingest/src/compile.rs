//! Assemble a schedule document from segmented date blocks.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use gpv_core::time::{UPDATE_FORMAT, local_midnight, to_iso_millis_utc};
use gpv_core::{DateMap, Fact, Preset, ScheduleDocument, ScheduleEncoder, ScheduleError};
use tracing::info;

use crate::types::DateBlock;

/// Encode every block and wrap the result with document metadata.
///
/// `fact.update` is the latest header update moment; blocks without one count
/// as updated at `now`'s wall-clock time on their own date.
pub fn compile_document(
    blocks: &[DateBlock],
    region_id: &str,
    now: DateTime<Tz>,
) -> gpv_core::Result<ScheduleDocument> {
    let tz = now.timezone();
    let mut data = DateMap::new();
    let mut latest_update: Option<NaiveDateTime> = None;

    for block in blocks {
        let mut encoder = ScheduleEncoder::new();
        for line in &block.lines {
            encoder.encode(line.group.clone(), &line.intervals);
        }
        if encoder.is_empty() {
            continue;
        }

        let key = local_midnight(block.date, tz).to_string();
        info!(date = %block.date, groups = encoder.len(), key = %key, "encoded schedule");
        data.insert(key, encoder.finish());

        let updated = block
            .date
            .and_time(block.updated_at.unwrap_or_else(|| now.time()));
        latest_update = latest_update.max(Some(updated));
    }

    if data.is_empty() {
        return Err(ScheduleError::NoSchedulesFound);
    }

    let update = latest_update
        .unwrap_or_else(|| now.naive_local())
        .format(UPDATE_FORMAT)
        .to_string();

    Ok(ScheduleDocument {
        region_id: region_id.to_string(),
        last_updated: to_iso_millis_utc(now.with_timezone(&Utc)),
        fact: Fact {
            data,
            update,
            today: local_midnight(now.date_naive(), tz),
        },
        preset: Preset::standard(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroupLine, HeaderKind};
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use gpv_core::time::LOCAL_TZ;
    use gpv_core::{Group, Interval, OutageState};

    fn now() -> DateTime<Tz> {
        LOCAL_TZ.with_ymd_and_hms(2025, 12, 6, 15, 20, 0).unwrap()
    }

    fn block(day: u32, updated_at: Option<NaiveTime>, lines: Vec<GroupLine>) -> DateBlock {
        DateBlock {
            date: NaiveDate::from_ymd_opt(2025, 12, day).unwrap(),
            kind: HeaderKind::Updated,
            updated_at,
            lines,
        }
    }

    fn line(group: &str, intervals: &[(f64, f64)]) -> GroupLine {
        GroupLine {
            group: Group::new(group),
            intervals: intervals
                .iter()
                .map(|(s, e)| Interval::new(*s, *e).unwrap())
                .collect(),
        }
    }

    #[test]
    fn test_compile_two_dates() {
        let blocks = vec![
            block(7, NaiveTime::from_hms_opt(9, 5, 0), vec![line("GPV1.1", &[(10.75, 11.25)])]),
            block(6, None, vec![line("GPV2.2", &[(0.0, 1.0)]), line("GPV2.2", &[(3.0, 3.5)])]),
        ];

        let doc = compile_document(&blocks, "Zaporizhzhia", now()).unwrap();
        assert_eq!(doc.region_id, "Zaporizhzhia");
        assert_eq!(doc.fact.today, 1764972000);
        assert_eq!(doc.fact.update, "07.12.2025 09:05");
        assert_eq!(doc.last_updated, "2025-12-06T13:20:00.000Z");

        let tomorrow = doc.day("1765058400").unwrap();
        let entry = tomorrow[&Group::new("GPV1.1")];
        assert_eq!(entry.get(11), OutageState::UnavailableSecondHalf);
        assert_eq!(entry.get(12), OutageState::UnavailableFirstHalf);

        let today = doc.day("1764972000").unwrap();
        let entry = today[&Group::new("GPV2.2")];
        assert_eq!(entry.get(1), OutageState::Unavailable);
        assert_eq!(entry.get(4), OutageState::UnavailableFirstHalf);
    }

    #[test]
    fn test_update_defaults_to_now_time() {
        let blocks = vec![block(6, None, vec![line("GPV1.1", &[])])];
        let doc = compile_document(&blocks, "Zaporizhzhia", now()).unwrap();
        assert_eq!(doc.fact.update, "06.12.2025 15:20");
    }

    #[test]
    fn test_no_blocks_is_soft_failure() {
        let err = compile_document(&[], "Zaporizhzhia", now()).unwrap_err();
        assert!(matches!(err, ScheduleError::NoSchedulesFound));
        assert!(err.is_soft());
    }
}
