use diesel::prelude::*;

use crate::domain::schedule::WeeklyScheduleEntry as DomainEntry;
use crate::domain::types::{StaffId, TypeConstraintError, Weekday};

/// Diesel model representing the `weekly_schedule` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::weekly_schedule)]
pub struct WeeklyScheduleRow {
    pub id: i32,
    pub staff_id: i32,
    pub weekday: i32,
    pub is_closed: bool,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

/// Insertable form of [`WeeklyScheduleRow`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::weekly_schedule)]
pub struct NewWeeklyScheduleRow {
    pub staff_id: i32,
    pub weekday: i32,
    pub is_closed: bool,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

impl TryFrom<WeeklyScheduleRow> for DomainEntry {
    type Error = TypeConstraintError;

    fn try_from(row: WeeklyScheduleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            weekday: Weekday::try_from(row.weekday)?,
            is_closed: row.is_closed,
            start_minutes: row.start_minutes,
            end_minutes: row.end_minutes,
        })
    }
}

impl NewWeeklyScheduleRow {
    pub fn from_entry(staff_id: StaffId, entry: &DomainEntry) -> Self {
        Self {
            staff_id: staff_id.get(),
            weekday: entry.weekday.into(),
            is_closed: entry.is_closed,
            start_minutes: entry.start_minutes,
            end_minutes: entry.end_minutes,
        }
    }
}
