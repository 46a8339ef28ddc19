use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::models::interview::UpcomingInterviewRow;

/// An upcoming interview with its start time shown in the user's zone.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingInterview {
    #[serde(flatten)]
    pub event: UpcomingInterviewRow,
    pub start_local: String,
}

impl UpcomingInterview {
    pub fn new(event: UpcomingInterviewRow, tz: Tz) -> Self {
        let start_local = event.start_datetime.with_timezone(&tz).to_rfc3339();
        Self { event, start_local }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub interviews: Vec<UpcomingInterview>,
}

/// Groups interviews by local calendar date in `tz`.
///
/// `rows` must already be sorted by start time; groups and their contents
/// keep that order.
pub fn group_by_local_day(rows: &[UpcomingInterviewRow], tz: Tz) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    for row in rows {
        let date = row.start_datetime.with_timezone(&tz).date_naive();
        let interview = UpcomingInterview::new(row.clone(), tz);
        match groups.last_mut() {
            Some(group) if group.date == date => group.interviews.push(interview),
            _ => groups.push(DayGroup {
                date,
                interviews: vec![interview],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn row(company: &str, start: &str) -> UpcomingInterviewRow {
        UpcomingInterviewRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            company_name: company.into(),
            start_datetime: DateTime::parse_from_rfc3339(start)
                .unwrap()
                .with_timezone(&Utc),
            interviewer_name: None,
            interview_type: Some("phone".into()),
            meeting_link: None,
            notes: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty() {
        assert!(group_by_local_day(&[], Tz::UTC).is_empty());
    }

    #[test]
    fn test_groups_preserve_order() {
        let rows = vec![
            row("Acme", "2025-06-02T09:00:00Z"),
            row("Globex", "2025-06-02T15:00:00Z"),
            row("Initech", "2025-06-04T10:00:00Z"),
        ];
        let groups = group_by_local_day(&rows, Tz::UTC);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, date("2025-06-02"));
        let names: Vec<_> = groups[0]
            .interviews
            .iter()
            .map(|i| i.event.company_name.as_str())
            .collect();
        assert_eq!(names, ["Acme", "Globex"]);
        assert_eq!(groups[1].date, date("2025-06-04"));
    }

    #[test]
    fn test_grouping_uses_local_date() {
        // 03:00 UTC on the 3rd is still the evening of the 2nd in New York.
        let rows = vec![
            row("Acme", "2025-06-02T20:00:00Z"),
            row("Globex", "2025-06-03T03:00:00Z"),
        ];
        let utc_groups = group_by_local_day(&rows, Tz::UTC);
        assert_eq!(utc_groups.len(), 2);

        let ny_groups = group_by_local_day(&rows, Tz::America__New_York);
        assert_eq!(ny_groups.len(), 1);
        assert_eq!(ny_groups[0].date, date("2025-06-02"));
        assert_eq!(
            ny_groups[0].interviews[1].start_local,
            "2025-06-02T23:00:00-04:00"
        );
    }

    #[test]
    fn test_serializes_flat() {
        let groups = group_by_local_day(&[row("Acme", "2025-06-02T09:00:00Z")], Tz::Asia__Tokyo);
        let json = serde_json::to_value(&groups).unwrap();
        assert_eq!(json[0]["date"], "2025-06-02");
        assert_eq!(json[0]["interviews"][0]["company_name"], "Acme");
        assert_eq!(json[0]["interviews"][0]["start_local"], "2025-06-02T18:00:00+09:00");
    }
}
