//! Weekly-schedule and time-off form parsing.
//!
//! The schedule form submits one field triple per weekday
//! (`wh-{weekday}-isClosed`, `wh-{weekday}-start`, `wh-{weekday}-end`);
//! the time-off form uses the `to-*` field family.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::schedule::{NewTimeOffEntry, WeeklyScheduleEntry, expand_date_range};
use crate::domain::time::{MINUTES_PER_DAY, parse_clock_to_minutes};
use crate::domain::types::{StaffId, Weekday};

/// All seven weekday entries derived from one schedule form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedulePayload {
    pub entries: [WeeklyScheduleEntry; 7],
}

impl WeeklySchedulePayload {
    /// Derive the seven weekday entries from the submitted field map.
    ///
    /// A present closed-flag wins over any submitted times. For open days an
    /// end at or before the start is repaired to a one-hour window capped at
    /// end of day. Malformed time strings degrade to midnight; this parser
    /// never fails.
    pub fn parse(form: &HashMap<String, String>) -> Self {
        let entries = Weekday::ALL.map(|weekday| {
            let index = weekday.get();
            if form.contains_key(&format!("wh-{index}-isClosed")) {
                return WeeklyScheduleEntry::closed(weekday);
            }

            let start = parse_clock_to_minutes(field(form, index, "start"));
            let mut end = parse_clock_to_minutes(field(form, index, "end"));
            if end <= start {
                end = (start + 60).min(MINUTES_PER_DAY);
            }

            WeeklyScheduleEntry {
                weekday,
                is_closed: false,
                start_minutes: start,
                end_minutes: end,
            }
        });

        Self { entries }
    }
}

fn field<'a>(form: &'a HashMap<String, String>, index: u8, suffix: &str) -> &'a str {
    form.get(&format!("wh-{index}-{suffix}"))
        .map(String::as_str)
        .unwrap_or("")
}

#[derive(Deserialize)]
pub struct TimeOffForm {
    #[serde(rename = "to-date-start")]
    pub date_start: String,
    #[serde(rename = "to-date-end", default)]
    pub date_end: Option<String>,
    #[serde(rename = "to-closed", default)]
    pub closed: Option<String>,
    #[serde(rename = "to-start", default)]
    pub start: Option<String>,
    #[serde(rename = "to-end", default)]
    pub end: Option<String>,
    #[serde(rename = "to-reason", default)]
    pub reason: Option<String>,
}

/// Normalized time-off submission: one date per calendar day plus the shared
/// interval and reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOffPayload {
    pub dates: Vec<NaiveDate>,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub reason: Option<String>,
}

impl TimeOffPayload {
    pub fn into_entries(self, staff_id: StaffId) -> Vec<NewTimeOffEntry> {
        let TimeOffPayload {
            dates,
            start_minutes,
            end_minutes,
            reason,
        } = self;
        dates
            .into_iter()
            .map(|date| NewTimeOffEntry {
                staff_id,
                date,
                start_minutes,
                end_minutes,
                reason: reason.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum TimeOffFormError {
    /// The start date did not parse; nothing must be persisted.
    #[error("time off start date is not a valid date")]
    InvalidStartDate,
}

impl TryFrom<TimeOffForm> for TimeOffPayload {
    type Error = TimeOffFormError;

    fn try_from(form: TimeOffForm) -> Result<Self, Self::Error> {
        let start_date = parse_date(&form.date_start).ok_or(TimeOffFormError::InvalidStartDate)?;
        let end_date = form.date_end.as_deref().and_then(parse_date);
        let dates = expand_date_range(start_date, end_date);

        // Closed means the whole day; open intervals are taken as-is, with
        // no repair rule, unlike the weekly schedule.
        let (start_minutes, end_minutes) = if form.closed.is_some() {
            (0, MINUTES_PER_DAY)
        } else {
            (
                parse_clock_to_minutes(form.start.as_deref().unwrap_or("")),
                parse_clock_to_minutes(form.end.as_deref().unwrap_or("")),
            )
        };

        let reason = form
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(Self {
            dates,
            start_minutes,
            end_minutes,
            reason,
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn closed_flag_wins_over_submitted_times() {
        let form = form_map(&[
            ("wh-2-isClosed", "on"),
            ("wh-2-start", "10:00"),
            ("wh-2-end", "18:00"),
        ]);
        let payload = WeeklySchedulePayload::parse(&form);
        let tuesday = payload.entries[2];
        assert!(tuesday.is_closed);
        assert_eq!(tuesday.start_minutes, 0);
        assert_eq!(tuesday.end_minutes, 0);
    }

    #[test]
    fn inverted_interval_is_repaired_to_one_hour() {
        let form = form_map(&[("wh-1-start", "10:00"), ("wh-1-end", "09:00")]);
        let payload = WeeklySchedulePayload::parse(&form);
        let monday = payload.entries[1];
        assert!(!monday.is_closed);
        assert_eq!(monday.start_minutes, 600);
        assert_eq!(monday.end_minutes, 660);
    }

    #[test]
    fn repair_rule_caps_at_end_of_day() {
        let form = form_map(&[("wh-0-start", "23:30"), ("wh-0-end", "23:30")]);
        let payload = WeeklySchedulePayload::parse(&form);
        assert_eq!(payload.entries[0].end_minutes, MINUTES_PER_DAY);
    }

    #[test]
    fn malformed_times_degrade_to_midnight() {
        let form = form_map(&[("wh-3-start", "bogus"), ("wh-3-end", "18:00")]);
        let payload = WeeklySchedulePayload::parse(&form);
        let wednesday = payload.entries[3];
        assert_eq!(wednesday.start_minutes, 0);
        assert_eq!(wednesday.end_minutes, 1080);
    }

    #[test]
    fn missing_fields_produce_a_repaired_open_day() {
        let payload = WeeklySchedulePayload::parse(&HashMap::new());
        for entry in payload.entries {
            assert!(!entry.is_closed);
            assert_eq!(entry.start_minutes, 0);
            assert_eq!(entry.end_minutes, 60);
        }
    }

    fn time_off_form(date_start: &str) -> TimeOffForm {
        TimeOffForm {
            date_start: date_start.to_string(),
            date_end: None,
            closed: None,
            start: None,
            end: None,
            reason: None,
        }
    }

    #[test]
    fn closed_time_off_covers_whole_day() {
        let mut form = time_off_form("2024-03-01");
        form.date_end = Some("2024-03-03".to_string());
        form.closed = Some("on".to_string());

        let payload = TimeOffPayload::try_from(form).unwrap();
        assert_eq!(payload.dates.len(), 3);
        assert_eq!(payload.start_minutes, 0);
        assert_eq!(payload.end_minutes, MINUTES_PER_DAY);
    }

    #[test]
    fn open_interval_is_not_repaired() {
        let mut form = time_off_form("2024-03-01");
        form.start = Some("15:00".to_string());
        form.end = Some("12:00".to_string());

        let payload = TimeOffPayload::try_from(form).unwrap();
        assert_eq!(payload.start_minutes, 900);
        assert_eq!(payload.end_minutes, 720);
    }

    #[test]
    fn invalid_start_date_aborts() {
        let form = time_off_form("not-a-date");
        assert!(TimeOffPayload::try_from(form).is_err());
    }

    #[test]
    fn blank_reason_is_dropped() {
        let mut form = time_off_form("2024-03-01");
        form.reason = Some("   ".to_string());
        let payload = TimeOffPayload::try_from(form).unwrap();
        assert_eq!(payload.reason, None);
    }

    #[test]
    fn entries_share_interval_and_reason() {
        let mut form = time_off_form("2024-03-01");
        form.date_end = Some("2024-03-02".to_string());
        form.closed = Some("on".to_string());
        form.reason = Some("vacation".to_string());

        let payload = TimeOffPayload::try_from(form).unwrap();
        let entries = payload.into_entries(StaffId::new(5).unwrap());
        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert_eq!(entry.staff_id.get(), 5);
            assert_eq!(entry.reason.as_deref(), Some("vacation"));
            assert_eq!(entry.end_minutes, MINUTES_PER_DAY);
        }
    }
}
