use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::staff::{NewStaffMember, StaffMember, StaffProfileUpdate};
use crate::domain::types::{NodeId, StaffId};
use crate::models::staff::{NewStaff as DbNewStaff, Staff as DbStaff};
use crate::repository::{
    DieselRepository, RepositoryResult, ServicesDiff, StaffListQuery, StaffReader, StaffWriter,
};

impl StaffReader for DieselRepository {
    fn list_staff(&self, query: StaffListQuery) -> RepositoryResult<(usize, Vec<StaffMember>)> {
        use crate::schema::staff;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = staff::table.into_boxed::<diesel::sqlite::Sqlite>();
            if !query.include_archived {
                items = items.filter(staff::is_active.eq(true));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order(staff::name.asc())
            .load::<DbStaff>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<StaffMember>, _>>()?;

        Ok((total, items))
    }

    fn get_staff_by_id(&self, id: StaffId) -> RepositoryResult<Option<StaffMember>> {
        use crate::schema::staff;

        let mut conn = self.conn()?;

        let member = staff::table
            .find(id.get())
            .first::<DbStaff>(&mut conn)
            .optional()?;

        Ok(member.map(TryInto::try_into).transpose()?)
    }

    fn list_staff_service_ids(&self, staff_id: StaffId) -> RepositoryResult<HashSet<NodeId>> {
        use crate::schema::staff_services;

        let mut conn = self.conn()?;

        let ids = staff_services::table
            .filter(staff_services::staff_id.eq(staff_id.get()))
            .select(staff_services::node_id)
            .load::<i32>(&mut conn)?;

        Ok(ids
            .into_iter()
            .map(NodeId::try_from)
            .collect::<Result<HashSet<NodeId>, _>>()?)
    }
}

impl StaffWriter for DieselRepository {
    fn create_staff(&self, staff: &NewStaffMember) -> RepositoryResult<StaffMember> {
        use crate::schema::staff;

        let mut conn = self.conn()?;
        let db_staff: DbNewStaff = staff.clone().into();

        let created = diesel::insert_into(staff::table)
            .values(db_staff)
            .get_result::<DbStaff>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_staff_profile(
        &self,
        id: StaffId,
        update: &StaffProfileUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::staff;

        let mut conn = self.conn()?;

        let affected = diesel::update(staff::table.find(id.get()))
            .set((
                staff::name.eq(update.name.as_str()),
                staff::phone.eq(update.phone.as_str()),
                staff::email.eq(update.email.as_deref()),
                staff::birth_date.eq(update.birth_date),
                staff::bio.eq(update.bio.as_deref()),
                staff::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_staff_avatar(&self, id: StaffId, avatar_url: Option<&str>) -> RepositoryResult<usize> {
        use crate::schema::staff;

        let mut conn = self.conn()?;

        let affected = diesel::update(staff::table.find(id.get()))
            .set((
                staff::avatar_url.eq(avatar_url),
                staff::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_staff_services(
        &self,
        staff_id: StaffId,
        submitted: &HashSet<NodeId>,
    ) -> RepositoryResult<ServicesDiff> {
        use crate::schema::staff_services;

        let mut conn = self.conn()?;

        let diff = conn.transaction(|conn| {
            let existing: HashSet<i32> = staff_services::table
                .filter(staff_services::staff_id.eq(staff_id.get()))
                .select(staff_services::node_id)
                .load::<i32>(conn)?
                .into_iter()
                .collect();
            let submitted: HashSet<i32> = submitted.iter().map(|id| id.get()).collect();

            let to_add: Vec<i32> = submitted.difference(&existing).copied().collect();
            let to_remove: Vec<i32> = existing.difference(&submitted).copied().collect();

            let added = if to_add.is_empty() {
                0
            } else {
                let rows: Vec<_> = to_add
                    .iter()
                    .map(|node_id| {
                        (
                            staff_services::staff_id.eq(staff_id.get()),
                            staff_services::node_id.eq(*node_id),
                        )
                    })
                    .collect();
                diesel::insert_into(staff_services::table)
                    .values(rows)
                    .execute(conn)?
            };

            let removed = if to_remove.is_empty() {
                0
            } else {
                diesel::delete(
                    staff_services::table
                        .filter(staff_services::staff_id.eq(staff_id.get()))
                        .filter(staff_services::node_id.eq_any(to_remove)),
                )
                .execute(conn)?
            };

            diesel::result::QueryResult::Ok(ServicesDiff { added, removed })
        })?;

        Ok(diff)
    }
}
