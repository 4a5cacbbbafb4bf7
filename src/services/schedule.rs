use crate::domain::types::{StaffId, TimeOffId};
use crate::forms::schedule::{TimeOffPayload, WeeklySchedulePayload};
use crate::repository::{ScheduleWriter, StaffReader};

use super::{ServiceError, ServiceResult};

/// Persist all seven weekday rows derived from one schedule form
/// submission. The repository replaces the member's rows in a single
/// transaction, so a save is never partially applied.
pub fn save_weekly_schedule<R>(
    staff_id: StaffId,
    payload: WeeklySchedulePayload,
    repo: &R,
) -> ServiceResult<bool>
where
    R: StaffReader + ScheduleWriter,
{
    match repo.get_staff_by_id(staff_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get staff member: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.replace_weekly_schedule(staff_id, &payload.entries) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to save weekly schedule: {e}");
            Ok(false)
        }
    }
}

/// Insert one time-off row per expanded calendar day in one transaction.
pub fn add_time_off<R>(staff_id: StaffId, payload: TimeOffPayload, repo: &R) -> ServiceResult<bool>
where
    R: StaffReader + ScheduleWriter,
{
    match repo.get_staff_by_id(staff_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get staff member: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let entries = payload.into_entries(staff_id);
    match repo.add_time_off(&entries) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to add time off: {e}");
            Ok(false)
        }
    }
}

pub fn remove_time_off<R>(
    staff_id: StaffId,
    time_off_id: TimeOffId,
    repo: &R,
) -> ServiceResult<bool>
where
    R: ScheduleWriter,
{
    match repo.delete_time_off(staff_id, time_off_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to delete time off: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::staff::StaffMember;
    use crate::domain::time::MINUTES_PER_DAY;
    use crate::domain::types::StaffName;
    use crate::forms::schedule::TimeOffForm;
    use crate::repository::ScheduleReader;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;
    use std::collections::HashMap;

    fn sample_staff(id: i32) -> StaffMember {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        StaffMember {
            id: StaffId::new(id).unwrap(),
            name: StaffName::new("Anna").unwrap(),
            phone: String::new(),
            email: None,
            birth_date: None,
            bio: None,
            avatar_url: None,
            is_active: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn saves_seven_rows_for_existing_member() {
        let repo = TestRepository::new().with_staff(vec![sample_staff(1)]);
        let staff_id = StaffId::new(1).unwrap();
        let payload = WeeklySchedulePayload::parse(&HashMap::from([
            ("wh-1-start".to_string(), "09:00".to_string()),
            ("wh-1-end".to_string(), "18:00".to_string()),
            ("wh-0-isClosed".to_string(), "on".to_string()),
        ]));

        assert!(save_weekly_schedule(staff_id, payload, &repo).unwrap());
        let stored = repo.get_weekly_schedule(staff_id).unwrap();
        assert_eq!(stored.len(), 7);
        assert!(stored[0].is_closed);
        assert_eq!(stored[1].start_minutes, 540);
    }

    #[test]
    fn schedule_save_for_missing_member_is_not_found() {
        let repo = TestRepository::new();
        let payload = WeeklySchedulePayload::parse(&HashMap::new());
        let err = save_weekly_schedule(StaffId::new(1).unwrap(), payload, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn time_off_range_creates_one_entry_per_day() {
        let repo = TestRepository::new().with_staff(vec![sample_staff(1)]);
        let staff_id = StaffId::new(1).unwrap();
        let payload = TimeOffPayload::try_from(TimeOffForm {
            date_start: "2024-03-01".to_string(),
            date_end: Some("2024-03-03".to_string()),
            closed: Some("on".to_string()),
            start: None,
            end: None,
            reason: Some("holiday".to_string()),
        })
        .unwrap();

        assert!(add_time_off(staff_id, payload, &repo).unwrap());
        let entries = repo.time_off_entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.start_minutes == 0));
        assert!(entries.iter().all(|e| e.end_minutes == MINUTES_PER_DAY));
    }

    #[test]
    fn removing_unknown_time_off_is_not_found() {
        let repo = TestRepository::new();
        let err = remove_time_off(
            StaffId::new(1).unwrap(),
            TimeOffId::new(99).unwrap(),
            &repo,
        )
        .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }
}
