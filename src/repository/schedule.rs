use diesel::prelude::*;

use crate::domain::schedule::{NewTimeOffEntry, TimeOffEntry, WeeklyScheduleEntry};
use crate::domain::types::{StaffId, TimeOffId};
use crate::models::schedule::{NewWeeklyScheduleRow, WeeklyScheduleRow};
use crate::models::time_off::{NewTimeOff as DbNewTimeOff, TimeOff as DbTimeOff};
use crate::repository::{DieselRepository, RepositoryResult, ScheduleReader, ScheduleWriter};

impl ScheduleReader for DieselRepository {
    fn get_weekly_schedule(
        &self,
        staff_id: StaffId,
    ) -> RepositoryResult<Vec<WeeklyScheduleEntry>> {
        use crate::schema::weekly_schedule;

        let mut conn = self.conn()?;

        let rows = weekly_schedule::table
            .filter(weekly_schedule::staff_id.eq(staff_id.get()))
            .order(weekly_schedule::weekday.asc())
            .load::<WeeklyScheduleRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<WeeklyScheduleEntry>, _>>()?)
    }

    fn list_time_off(&self, staff_id: StaffId) -> RepositoryResult<Vec<TimeOffEntry>> {
        use crate::schema::time_off;

        let mut conn = self.conn()?;

        let rows = time_off::table
            .filter(time_off::staff_id.eq(staff_id.get()))
            .order((time_off::date.asc(), time_off::id.asc()))
            .load::<DbTimeOff>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<TimeOffEntry>, _>>()?)
    }
}

impl ScheduleWriter for DieselRepository {
    fn replace_weekly_schedule(
        &self,
        staff_id: StaffId,
        entries: &[WeeklyScheduleEntry; 7],
    ) -> RepositoryResult<usize> {
        use crate::schema::weekly_schedule;

        let mut conn = self.conn()?;

        // All seven rows are replaced together; a failure rolls the previous
        // schedule back untouched.
        let affected = conn.transaction(|conn| {
            diesel::delete(
                weekly_schedule::table.filter(weekly_schedule::staff_id.eq(staff_id.get())),
            )
            .execute(conn)?;

            let rows: Vec<NewWeeklyScheduleRow> = entries
                .iter()
                .map(|entry| NewWeeklyScheduleRow::from_entry(staff_id, entry))
                .collect();

            diesel::insert_into(weekly_schedule::table)
                .values(rows)
                .execute(conn)
        })?;

        Ok(affected)
    }

    fn add_time_off(&self, entries: &[NewTimeOffEntry]) -> RepositoryResult<usize> {
        use crate::schema::time_off;

        let mut conn = self.conn()?;

        let rows: Vec<DbNewTimeOff> = entries.iter().cloned().map(Into::into).collect();

        let affected = conn.transaction(|conn| {
            diesel::insert_into(time_off::table)
                .values(rows)
                .execute(conn)
        })?;

        Ok(affected)
    }

    fn delete_time_off(
        &self,
        staff_id: StaffId,
        time_off_id: TimeOffId,
    ) -> RepositoryResult<usize> {
        use crate::schema::time_off;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            time_off::table
                .filter(time_off::id.eq(time_off_id.get()))
                .filter(time_off::staff_id.eq(staff_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
