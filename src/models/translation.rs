use diesel::prelude::*;

use crate::domain::catalog::Translation as DomainTranslation;
use crate::domain::types::{Locale, TypeConstraintError};

/// Diesel model representing the `catalog_translations` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::catalog_translations)]
pub struct Translation {
    pub id: i32,
    pub node_id: i32,
    pub locale: String,
    pub name: String,
    pub description: Option<String>,
}

/// Insertable form of [`Translation`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::catalog_translations)]
pub struct NewTranslation {
    pub node_id: i32,
    pub locale: String,
    pub name: String,
    pub description: Option<String>,
}

impl TryFrom<Translation> for DomainTranslation {
    type Error = TypeConstraintError;

    fn try_from(row: Translation) -> Result<Self, Self::Error> {
        Ok(Self {
            node_id: row.node_id.try_into()?,
            locale: Locale::new(row.locale)?,
            name: row.name,
            description: row.description,
        })
    }
}

impl From<DomainTranslation> for NewTranslation {
    fn from(translation: DomainTranslation) -> Self {
        Self {
            node_id: translation.node_id.get(),
            locale: translation.locale.into_inner(),
            name: translation.name,
            description: translation.description,
        }
    }
}
