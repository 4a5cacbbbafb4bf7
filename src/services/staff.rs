use std::collections::HashSet;

use crate::domain::staff::StaffProfileUpdate;
use crate::domain::tree::build_tree;
use crate::domain::types::{NodeId, StaffId};
use crate::dto::catalog::flatten_tree;
use crate::dto::staff::{StaffDetailDto, StaffDto, schedule_rows};
use crate::forms::staff::CreateStaffFormPayload;
use crate::repository::{
    CatalogReader, NodeListQuery, ScheduleReader, StaffListQuery, StaffReader, StaffWriter,
};

use super::{ServiceError, ServiceResult};

pub fn show_staff_list<R>(repo: &R) -> ServiceResult<Vec<StaffDto>>
where
    R: StaffReader,
{
    match repo.list_staff(StaffListQuery::default()) {
        Ok((_total, members)) => Ok(members.into_iter().map(StaffDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list staff: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Core business logic for rendering the staff detail page: profile fields,
/// the seven schedule rows, the time-off ledger and the service tree with
/// the member's current selection checked.
pub fn show_staff_detail<R>(id: StaffId, repo: &R) -> ServiceResult<StaffDetailDto>
where
    R: StaffReader + ScheduleReader + CatalogReader,
{
    let member = match repo.get_staff_by_id(id) {
        Ok(Some(member)) => member,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get staff member: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let schedule = match repo.get_weekly_schedule(id) {
        Ok(entries) => schedule_rows(&entries),
        Err(e) => {
            log::error!("Failed to load weekly schedule: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let time_off = match repo.list_time_off(id) {
        Ok(entries) => entries.into_iter().map(Into::into).collect(),
        Err(e) => {
            log::error!("Failed to load time off: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let checked = match repo.list_staff_service_ids(id) {
        Ok(ids) => ids,
        Err(e) => {
            log::error!("Failed to load staff services: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let services = match repo.list_nodes(NodeListQuery::default()) {
        Ok(nodes) => flatten_tree(&build_tree(nodes), &checked),
        Err(e) => {
            log::error!("Failed to list catalog nodes: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(StaffDetailDto {
        profile: member.into(),
        schedule,
        time_off,
        services,
    })
}

pub fn create_staff<R>(payload: CreateStaffFormPayload, repo: &R) -> ServiceResult<StaffId>
where
    R: StaffWriter,
{
    match repo.create_staff(&payload.into_new_staff()) {
        Ok(member) => Ok(member.id),
        Err(e) => {
            log::error!("Failed to create staff member: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_profile<R>(id: StaffId, update: StaffProfileUpdate, repo: &R) -> ServiceResult<bool>
where
    R: StaffReader + StaffWriter,
{
    match repo.get_staff_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get staff member: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.update_staff_profile(id, &update) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to update staff profile: {e}");
            Ok(false)
        }
    }
}

/// Replace the member's offered-services set wholesale; the repository
/// applies the symmetric difference in one transaction.
pub fn set_services<R>(id: StaffId, submitted: HashSet<NodeId>, repo: &R) -> ServiceResult<bool>
where
    R: StaffReader + StaffWriter,
{
    match repo.get_staff_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get staff member: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.set_staff_services(id, &submitted) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to set staff services: {e}");
            Ok(false)
        }
    }
}

/// Point the member's avatar at a freshly stored upload. Returns the
/// previous URL so the caller can clean the old file up best-effort.
pub fn store_avatar<R>(id: StaffId, public_url: &str, repo: &R) -> ServiceResult<Option<String>>
where
    R: StaffReader + StaffWriter,
{
    let member = match repo.get_staff_by_id(id) {
        Ok(Some(member)) => member,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get staff member: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.set_staff_avatar(id, Some(public_url)) {
        Ok(_) => Ok(member.avatar_url),
        Err(e) => {
            log::error!("Failed to set staff avatar: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Clear the member's avatar. Returns the removed URL for cleanup.
pub fn remove_avatar<R>(id: StaffId, repo: &R) -> ServiceResult<Option<String>>
where
    R: StaffReader + StaffWriter,
{
    let member = match repo.get_staff_by_id(id) {
        Ok(Some(member)) => member,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get staff member: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.set_staff_avatar(id, None) {
        Ok(_) => Ok(member.avatar_url),
        Err(e) => {
            log::error!("Failed to clear staff avatar: {e}");
            Err(ServiceError::Internal)
        }
    }
}
