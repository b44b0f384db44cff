//! Day grouping for presentation.
//!
//! # Invariants
//! - Groups are keyed by the local date of `created_at` in the given zone.
//! - Groups are ordered newest day first; records inside a group oldest first.
//! - Invalid records are dropped, and a group left empty is dropped with them.

use crate::model::group::ThoughtGroup;
use crate::model::thought::SavedThought;
use chrono::{NaiveDate, TimeZone};
use log::debug;
use std::collections::BTreeMap;

/// Buckets thoughts by calendar day in `tz`.
pub fn group_by_day<Tz: TimeZone>(
    thoughts: impl IntoIterator<Item = SavedThought>,
    tz: &Tz,
) -> Vec<ThoughtGroup> {
    let mut days: BTreeMap<NaiveDate, Vec<SavedThought>> = BTreeMap::new();
    for thought in thoughts {
        if let Err(err) = thought.validate() {
            debug!(
                "event=thoughts_group module=grouping status=skipped error={}",
                err
            );
            continue;
        }
        let date = thought.created_at.with_timezone(tz).date_naive();
        days.entry(date).or_default().push(thought);
    }

    days.into_iter()
        .rev()
        .map(|(date, mut thoughts)| {
            // Stable: same-instant records keep their input order.
            thoughts.sort_by_key(|thought| thought.created_at);
            ThoughtGroup { date, thoughts }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::group_by_day;
    use crate::model::thought::{SavedThought, Thought};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    fn saved(id: &str, rfc3339: &str) -> SavedThought {
        let at = chrono::DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc);
        SavedThought {
            uuid: id.to_string(),
            created_at: at,
            updated_at: at,
            thought: Thought::default(),
        }
    }

    #[test]
    fn local_offset_moves_late_utc_record_to_next_day() {
        let thoughts = vec![saved("a", "2023-01-01T23:30:00Z")];

        let utc_groups = group_by_day(thoughts.clone(), &Utc);
        assert_eq!(
            utc_groups[0].date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let tokyo_groups = group_by_day(thoughts, &tokyo);
        assert_eq!(
            tokyo_groups[0].date,
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
        );
    }

    #[test]
    fn invalid_records_are_dropped_with_their_empty_group() {
        let thoughts = vec![
            saved("", "2023-01-01T10:00:00Z"),
            saved("b", "2023-01-02T10:00:00Z"),
        ];

        let groups = group_by_day(thoughts, &Utc);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].thoughts[0].uuid, "b");
    }

    #[test]
    fn groups_are_newest_day_first_and_records_oldest_first() {
        let thoughts = vec![
            saved("late", "2023-01-01T18:00:00Z"),
            saved("next-day", "2023-01-02T08:00:00Z"),
            saved("early", "2023-01-01T07:00:00Z"),
        ];

        let groups = group_by_day(thoughts, &Utc);
        let dates: Vec<_> = groups.iter().map(|g| g.date.to_string()).collect();
        assert_eq!(dates, vec!["2023-01-02", "2023-01-01"]);
        let ids: Vec<_> = groups[1].thoughts.iter().map(|t| t.uuid.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
        let day = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap().date_naive();
        assert!(groups[0].is_on(day));
    }
}
