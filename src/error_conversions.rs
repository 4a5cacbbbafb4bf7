//! Error conversion glue for library consumers.
//!
//! Route handlers match on form errors directly, but embedders driving the
//! service layer programmatically get `?`-friendly conversions from the
//! form and domain error types into [`ServiceError`].

use crate::domain::types::TypeConstraintError;
use crate::forms::catalog::{AddNodeFormError, TranslationFormError, UpdateNodeFormError};
use crate::forms::schedule::TimeOffFormError;
use crate::forms::staff::{CreateStaffFormError, UpdateProfileFormError};
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CreateStaffFormError> for ServiceError {
    fn from(val: CreateStaffFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateProfileFormError> for ServiceError {
    fn from(val: UpdateProfileFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TimeOffFormError> for ServiceError {
    fn from(val: TimeOffFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<AddNodeFormError> for ServiceError {
    fn from(val: AddNodeFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateNodeFormError> for ServiceError {
    fn from(val: UpdateNodeFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TranslationFormError> for ServiceError {
    fn from(val: TranslationFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
