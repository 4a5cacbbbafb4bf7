use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::catalog::{
    CatalogNode as DomainCatalogNode, NewCatalogNode as DomainNewCatalogNode, NodeKind,
};
use crate::domain::types::{NodeName, Slug, TypeConstraintError};

/// Diesel model representing the `catalog_nodes` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::catalog_nodes)]
pub struct CatalogNode {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub kind: String,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i32>,
    pub cover_image_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`CatalogNode`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::catalog_nodes)]
pub struct NewCatalogNode {
    pub parent_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub kind: String,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i32>,
}

impl TryFrom<CatalogNode> for DomainCatalogNode {
    type Error = TypeConstraintError;

    fn try_from(node: CatalogNode) -> Result<Self, Self::Error> {
        Ok(Self {
            id: node.id.try_into()?,
            parent_id: node.parent_id.map(TryInto::try_into).transpose()?,
            name: NodeName::new(node.name)?,
            slug: Slug::new(node.slug)?,
            description: node.description,
            kind: NodeKind::try_from(node.kind.as_str())?,
            duration_minutes: node.duration_minutes,
            price_cents: node.price_cents,
            cover_image_url: node.cover_image_url,
            is_active: node.is_active,
            created_at: node.created_at,
            updated_at: node.updated_at,
        })
    }
}

impl From<DomainNewCatalogNode> for NewCatalogNode {
    fn from(node: DomainNewCatalogNode) -> Self {
        Self {
            parent_id: node.parent_id.map(Into::into),
            name: node.name.into_inner(),
            slug: node.slug.into_inner(),
            description: node.description,
            kind: node.kind.as_str().to_string(),
            duration_minutes: node.duration_minutes,
            price_cents: node.price_cents,
        }
    }
}
