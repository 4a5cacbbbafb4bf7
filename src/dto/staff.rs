use serde::Serialize;

use crate::domain::schedule::{TimeOffEntry, WeeklyScheduleEntry};
use crate::domain::staff::StaffMember;
use crate::domain::time::minutes_to_clock;
use crate::domain::types::Weekday;
use crate::dto::catalog::TreeRowDto;

const WEEKDAY_LABELS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Staff list row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaffDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
}

impl From<StaffMember> for StaffDto {
    fn from(member: StaffMember) -> Self {
        Self {
            id: member.id.get(),
            name: member.name.into_inner(),
            phone: member.phone,
            email: member.email,
            avatar_url: member.avatar_url,
            is_active: member.is_active,
        }
    }
}

/// Full profile fields for the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct StaffProfileDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
}

impl From<StaffMember> for StaffProfileDto {
    fn from(member: StaffMember) -> Self {
        Self {
            id: member.id.get(),
            name: member.name.into_inner(),
            phone: member.phone,
            email: member.email,
            birth_date: member.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
            bio: member.bio,
            avatar_url: member.avatar_url,
            is_active: member.is_active,
        }
    }
}

/// One weekday row of the schedule form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleRowDto {
    pub weekday: u8,
    pub label: &'static str,
    pub is_closed: bool,
    pub start: String,
    pub end: String,
}

/// The seven form rows in weekday order. Weekdays without a stored row
/// render closed, which is also what an untouched form submits back.
pub fn schedule_rows(stored: &[WeeklyScheduleEntry]) -> Vec<ScheduleRowDto> {
    Weekday::ALL
        .iter()
        .map(|weekday| {
            let entry = stored
                .iter()
                .find(|e| e.weekday == *weekday)
                .copied()
                .unwrap_or_else(|| WeeklyScheduleEntry::closed(*weekday));
            ScheduleRowDto {
                weekday: weekday.get(),
                label: WEEKDAY_LABELS[weekday.get() as usize],
                is_closed: entry.is_closed,
                start: minutes_to_clock(entry.start_minutes),
                end: minutes_to_clock(entry.end_minutes),
            }
        })
        .collect()
}

/// Time-off list row; a `[0, 1440]` interval renders as the whole day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimeOffDto {
    pub id: i32,
    pub date: String,
    pub whole_day: bool,
    pub interval: String,
    pub reason: Option<String>,
}

impl From<TimeOffEntry> for TimeOffDto {
    fn from(entry: TimeOffEntry) -> Self {
        let whole_day = entry.is_whole_day();
        let interval = if whole_day {
            "Whole day".to_string()
        } else {
            format!(
                "{} to {}",
                minutes_to_clock(entry.start_minutes),
                minutes_to_clock(entry.end_minutes)
            )
        };
        Self {
            id: entry.id.get(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            whole_day,
            interval,
            reason: entry.reason,
        }
    }
}

/// Everything the staff detail page renders.
#[derive(Debug, Clone, Serialize)]
pub struct StaffDetailDto {
    pub profile: StaffProfileDto,
    pub schedule: Vec<ScheduleRowDto>,
    pub time_off: Vec<TimeOffDto>,
    pub services: Vec<TreeRowDto>,
}
