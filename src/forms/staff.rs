use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use std::collections::HashSet;

use crate::domain::staff::{NewStaffMember, StaffProfileUpdate};
use crate::domain::types::{NodeId, StaffName, TypeConstraintError};

/// Where the operator lands after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveIntent {
    #[default]
    Save,
    SaveAndClose,
}

impl SaveIntent {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("save_close") => SaveIntent::SaveAndClose,
            _ => SaveIntent::Save,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateStaffForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStaffFormPayload {
    pub name: StaffName,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
}

impl CreateStaffFormPayload {
    pub fn into_new_staff(self) -> NewStaffMember {
        NewStaffMember {
            name: self.name,
            phone: self.phone,
            email: self.email,
            birth_date: self.birth_date,
            bio: self.bio,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateStaffFormError {
    #[error("create staff form validation failed: {0}")]
    Validation(String),
    #[error("create staff form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateStaffFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateStaffFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateStaffForm> for CreateStaffFormPayload {
    type Error = CreateStaffFormError;

    fn try_from(form: CreateStaffForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: StaffName::new(form.name)?,
            phone: normalize_optional(form.phone).unwrap_or_default(),
            email: normalize_optional(form.email),
            birth_date: form.birth_date.as_deref().and_then(parse_date),
            bio: normalize_optional(form.bio),
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProfileFormPayload {
    pub update: StaffProfileUpdate,
    pub intent: SaveIntent,
}

#[derive(Debug, Error)]
pub enum UpdateProfileFormError {
    #[error("profile form validation failed: {0}")]
    Validation(String),
    #[error("profile form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateProfileFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateProfileFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateProfileForm> for UpdateProfileFormPayload {
    type Error = UpdateProfileFormError;

    fn try_from(form: UpdateProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let intent = SaveIntent::parse(form.intent.as_deref());
        Ok(Self {
            update: StaffProfileUpdate {
                name: StaffName::new(form.name)?,
                phone: normalize_optional(form.phone).unwrap_or_default(),
                email: normalize_optional(form.email),
                birth_date: form.birth_date.as_deref().and_then(parse_date),
                bio: normalize_optional(form.bio),
            },
            intent,
        })
    }
}

/// Avatar upload from the profile tab. The multipart limit sits above the
/// 5 MiB maximum; the handler enforces the real limit and redirects with
/// `error=too_big`.
#[derive(MultipartForm)]
pub struct AvatarUploadForm {
    #[multipart(limit = "8MiB")]
    pub avatar: TempFile,
}

/// The staff-services tab submits one `services` field per checked node.
/// Values that are not positive integers are skipped.
pub fn parse_service_selection(pairs: &[(String, String)]) -> HashSet<NodeId> {
    pairs
        .iter()
        .filter(|(key, _)| key == "services")
        .filter_map(|(_, value)| value.trim().parse::<i32>().ok())
        .filter_map(|id| NodeId::new(id).ok())
        .collect()
}

/// The `intent` field of an opaque pair list, for redirect decisions.
pub fn parse_intent(pairs: &[(String, String)]) -> SaveIntent {
    SaveIntent::parse(
        pairs
            .iter()
            .find(|(key, _)| key == "intent")
            .map(|(_, value)| value.as_str()),
    )
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
