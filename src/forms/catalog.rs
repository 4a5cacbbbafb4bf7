use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::catalog::{CatalogNodeUpdate, NewCatalogNode, NodeKind, Translation};
use crate::domain::types::{Locale, NodeId, NodeName, Slug, TypeConstraintError};

/// Derive a URL slug from a display name: lowercase, alphanumeric runs
/// joined by single dashes.
fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Parse a currency amount like `"25"` or `"25.50"` into cents.
fn parse_price_to_cents(value: &str) -> Option<i32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    let whole: i32 = whole.parse().ok()?;
    let cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i32>().ok()? * 10,
        2 => fraction.parse::<i32>().ok()?,
        _ => return None,
    };
    if whole < 0 {
        return None;
    }
    whole.checked_mul(100)?.checked_add(cents)
}

fn parse_optional_i32(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.trim().parse::<i32>().ok())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Deserialize, Validate)]
pub struct AddNodeForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddNodeFormPayload {
    pub node: NewCatalogNode,
}

#[derive(Debug, Error)]
pub enum AddNodeFormError {
    #[error("add node form validation failed: {0}")]
    Validation(String),
    #[error("add node form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddNodeFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddNodeFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddNodeForm> for AddNodeFormPayload {
    type Error = AddNodeFormError;

    fn try_from(form: AddNodeForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let kind = NodeKind::try_from(form.kind.as_str())?;
        let slug = match normalize_optional(form.slug) {
            Some(slug) => Slug::new(slug)?,
            None => Slug::new(slugify(&form.name))?,
        };

        // Duration and price only carry meaning for services.
        let (duration_minutes, price_cents) = match kind {
            NodeKind::Service => (
                parse_optional_i32(form.duration_minutes.as_deref()),
                form.price.as_deref().and_then(parse_price_to_cents),
            ),
            NodeKind::Category => (None, None),
        };

        Ok(Self {
            node: NewCatalogNode {
                parent_id: parse_optional_i32(form.parent_id.as_deref())
                    .map(NodeId::new)
                    .transpose()?,
                name: NodeName::new(form.name)?,
                slug,
                description: normalize_optional(form.description),
                kind,
                duration_minutes,
                price_cents,
            },
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateNodeForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateNodeFormPayload {
    pub update: CatalogNodeUpdate,
}

#[derive(Debug, Error)]
pub enum UpdateNodeFormError {
    #[error("update node form validation failed: {0}")]
    Validation(String),
    #[error("update node form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateNodeFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateNodeFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateNodeForm> for UpdateNodeFormPayload {
    type Error = UpdateNodeFormError;

    fn try_from(form: UpdateNodeForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let slug = match normalize_optional(form.slug) {
            Some(slug) => Slug::new(slug)?,
            None => Slug::new(slugify(&form.name))?,
        };

        Ok(Self {
            update: CatalogNodeUpdate {
                parent_id: parse_optional_i32(form.parent_id.as_deref())
                    .map(NodeId::new)
                    .transpose()?,
                name: NodeName::new(form.name)?,
                slug,
                description: normalize_optional(form.description),
                duration_minutes: parse_optional_i32(form.duration_minutes.as_deref()),
                price_cents: form.price.as_deref().and_then(parse_price_to_cents),
                is_active: form.is_active.is_some(),
            },
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct TranslationForm {
    #[validate(length(min = 1))]
    pub locale: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationFormPayload {
    pub locale: Locale,
    pub name: String,
    pub description: Option<String>,
}

impl TranslationFormPayload {
    pub fn into_translation(self, node_id: NodeId) -> Translation {
        Translation {
            node_id,
            locale: self.locale,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Error)]
pub enum TranslationFormError {
    #[error("translation form validation failed: {0}")]
    Validation(String),
    #[error("translation form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for TranslationFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for TranslationFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<TranslationForm> for TranslationFormPayload {
    type Error = TranslationFormError;

    fn try_from(form: TranslationForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            locale: Locale::new(form.locale)?,
            name: form.name.trim().to_string(),
            description: normalize_optional(form.description),
        })
    }
}
