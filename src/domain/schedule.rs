//! Weekly working hours and date-stamped time-off exceptions.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::time::MINUTES_PER_DAY;
use crate::domain::types::{StaffId, TimeOffId, Weekday};

/// Open/closed state and open interval for one weekday of a staff member's
/// recurring schedule.
///
/// When `is_closed` is true the interval values are persisted as `0/0` and
/// carry no scheduling meaning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyScheduleEntry {
    pub weekday: Weekday,
    pub is_closed: bool,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

impl WeeklyScheduleEntry {
    /// A closed day with the interval zeroed out.
    pub fn closed(weekday: Weekday) -> Self {
        Self {
            weekday,
            is_closed: true,
            start_minutes: 0,
            end_minutes: 0,
        }
    }
}

/// A calendar-day exception (holiday, partial-day closure) for one staff
/// member. An interval of exactly `[0, 1440]` means the whole day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffEntry {
    pub id: TimeOffId,
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TimeOffEntry {
    pub fn is_whole_day(&self) -> bool {
        self.start_minutes == 0 && self.end_minutes == MINUTES_PER_DAY
    }
}

/// Data required to insert one [`TimeOffEntry`] row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTimeOffEntry {
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub reason: Option<String>,
}

/// Expand an operator-submitted date range into one date per calendar day,
/// inclusive. A missing end date, or one preceding the start, collapses the
/// range to the start day alone.
pub fn expand_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Vec<NaiveDate> {
    let end = match end {
        Some(end) if end >= start => end,
        _ => start,
    };
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn expands_inclusive_range() {
        let days = expand_date_range(date(2024, 3, 1), Some(date(2024, 3, 3)));
        assert_eq!(
            days,
            vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)]
        );
    }

    #[test]
    fn missing_end_collapses_to_single_day() {
        assert_eq!(
            expand_date_range(date(2024, 3, 1), None),
            vec![date(2024, 3, 1)]
        );
    }

    #[test]
    fn end_before_start_collapses_to_single_day() {
        assert_eq!(
            expand_date_range(date(2024, 3, 10), Some(date(2024, 3, 1))),
            vec![date(2024, 3, 10)]
        );
    }

    #[test]
    fn range_crosses_month_boundary() {
        let days = expand_date_range(date(2024, 2, 28), Some(date(2024, 3, 1)));
        assert_eq!(
            days,
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    #[test]
    fn whole_day_convention() {
        let entry = TimeOffEntry {
            id: TimeOffId::new(1).unwrap(),
            staff_id: StaffId::new(1).unwrap(),
            date: date(2024, 3, 1),
            start_minutes: 0,
            end_minutes: MINUTES_PER_DAY,
            reason: None,
            created_at: chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        };
        assert!(entry.is_whole_day());
    }
}
