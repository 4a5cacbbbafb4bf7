use std::collections::HashSet;

use serde::Serialize;

use crate::domain::catalog::{CatalogNode, NodeKind, Translation};
use crate::domain::tree::TreeNode;
use crate::domain::types::NodeId;

/// One row of the flattened catalog tree, in render order. `depth` drives
/// indentation; leaves are selectable in the staff services form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TreeRowDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub depth: usize,
    pub kind: &'static str,
    pub is_service: bool,
    pub duration_minutes: Option<i32>,
    pub price: Option<String>,
    pub is_active: bool,
    pub checked: bool,
}

impl TreeRowDto {
    fn from_node(node: &CatalogNode, depth: usize, checked: &HashSet<NodeId>) -> Self {
        Self {
            id: node.id.get(),
            name: node.name.as_str().to_string(),
            slug: node.slug.as_str().to_string(),
            depth,
            kind: node.kind.as_str(),
            is_service: node.kind == NodeKind::Service,
            duration_minutes: node.duration_minutes,
            price: node.price_cents.map(format_price_cents),
            is_active: node.is_active,
            checked: checked.contains(&node.id),
        }
    }
}

/// Flatten a sorted tree into indented rows, parents before children.
pub fn flatten_tree(tree: &[TreeNode], checked: &HashSet<NodeId>) -> Vec<TreeRowDto> {
    let mut rows = Vec::new();
    push_rows(tree, 0, checked, &mut rows);
    rows
}

fn push_rows(
    level: &[TreeNode],
    depth: usize,
    checked: &HashSet<NodeId>,
    rows: &mut Vec<TreeRowDto>,
) {
    for entry in level {
        rows.push(TreeRowDto::from_node(&entry.node, depth, checked));
        push_rows(&entry.children, depth + 1, checked, rows);
    }
}

/// Format integer cents as a decimal amount, e.g. `2550` as `"25.50"`.
pub fn format_price_cents(cents: i32) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

/// Catalog node detail with its translations, for the edit page.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetailDto {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub kind: &'static str,
    pub is_service: bool,
    pub duration_minutes: Option<i32>,
    pub price: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_active: bool,
    pub translations: Vec<TranslationDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationDto {
    pub locale: String,
    pub name: String,
    pub description: Option<String>,
}

impl NodeDetailDto {
    pub fn new(node: CatalogNode, translations: Vec<Translation>) -> Self {
        Self {
            id: node.id.get(),
            parent_id: node.parent_id.map(NodeId::get),
            name: node.name.into_inner(),
            slug: node.slug.into_inner(),
            description: node.description,
            kind: node.kind.as_str(),
            is_service: node.kind == NodeKind::Service,
            duration_minutes: node.duration_minutes,
            price: node.price_cents.map(format_price_cents),
            cover_image_url: node.cover_image_url,
            is_active: node.is_active,
            translations: translations
                .into_iter()
                .map(|t| TranslationDto {
                    locale: t.locale.into_inner(),
                    name: t.name,
                    description: t.description,
                })
                .collect(),
        }
    }
}
