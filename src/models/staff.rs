use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::staff::{
    NewStaffMember as DomainNewStaffMember, StaffMember as DomainStaffMember,
};
use crate::domain::types::{StaffName, TypeConstraintError};

/// Diesel model representing the `staff` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::staff)]
pub struct Staff {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Staff`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::staff)]
pub struct NewStaff {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
}

impl TryFrom<Staff> for DomainStaffMember {
    type Error = TypeConstraintError;

    fn try_from(staff: Staff) -> Result<Self, Self::Error> {
        Ok(Self {
            id: staff.id.try_into()?,
            name: StaffName::new(staff.name)?,
            phone: staff.phone,
            email: staff.email,
            birth_date: staff.birth_date,
            bio: staff.bio,
            avatar_url: staff.avatar_url,
            is_active: staff.is_active,
            created_at: staff.created_at,
            updated_at: staff.updated_at,
        })
    }
}

impl From<DomainNewStaffMember> for NewStaff {
    fn from(staff: DomainNewStaffMember) -> Self {
        Self {
            name: staff.name.into_inner(),
            phone: staff.phone,
            email: staff.email,
            birth_date: staff.birth_date,
            bio: staff.bio,
        }
    }
}
