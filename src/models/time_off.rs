use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::schedule::{NewTimeOffEntry as DomainNewTimeOff, TimeOffEntry as DomainTimeOff};
use crate::domain::types::TypeConstraintError;

/// Diesel model representing the `time_off` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::time_off)]
pub struct TimeOff {
    pub id: i32,
    pub staff_id: i32,
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`TimeOff`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::time_off)]
pub struct NewTimeOff {
    pub staff_id: i32,
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub reason: Option<String>,
}

impl TryFrom<TimeOff> for DomainTimeOff {
    type Error = TypeConstraintError;

    fn try_from(row: TimeOff) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            staff_id: row.staff_id.try_into()?,
            date: row.date,
            start_minutes: row.start_minutes,
            end_minutes: row.end_minutes,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

impl From<DomainNewTimeOff> for NewTimeOff {
    fn from(entry: DomainNewTimeOff) -> Self {
        Self {
            staff_id: entry.staff_id.get(),
            date: entry.date,
            start_minutes: entry.start_minutes,
            end_minutes: entry.end_minutes,
            reason: entry.reason,
        }
    }
}
