use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Locale, NodeId, NodeName, Slug, TypeConstraintError};

/// Whether a catalog node groups other nodes or is a bookable service.
///
/// Stored explicitly rather than inferred from whether children exist; the
/// operator picks the kind at creation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Category,
    Service,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Category => "category",
            NodeKind::Service => "service",
        }
    }
}

impl TryFrom<&str> for NodeKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "category" => Ok(NodeKind::Category),
            "service" => Ok(NodeKind::Service),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown node kind: {other}"
            ))),
        }
    }
}

/// One node of the service/category tree, persisted flat via `parent_id`.
///
/// `duration_minutes` and `price_cents` are meaningful only for
/// [`NodeKind::Service`] nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub name: NodeName,
    pub slug: Slug,
    pub description: Option<String>,
    pub kind: NodeKind,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i32>,
    pub cover_image_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`CatalogNode`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCatalogNode {
    pub parent_id: Option<NodeId>,
    pub name: NodeName,
    pub slug: Slug,
    pub description: Option<String>,
    pub kind: NodeKind,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i32>,
}

/// In-place update of a [`CatalogNode`].
///
/// A submitted `parent_id` equal to the node's own id is ignored by the
/// write path, which keeps the previously stored parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogNodeUpdate {
    pub parent_id: Option<NodeId>,
    pub name: NodeName,
    pub slug: Slug,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i32>,
    pub is_active: bool,
}

/// Per-locale display strings for a catalog node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub node_id: NodeId,
    pub locale: Locale,
    pub name: String,
    pub description: Option<String>,
}
