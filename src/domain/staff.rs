use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{StaffId, StaffName};

/// A staff member ("master") managed through the admin screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: StaffName,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`StaffMember`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewStaffMember {
    pub name: StaffName,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
}

/// In-place profile update applied from the profile tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffProfileUpdate {
    pub name: StaffName,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
}
