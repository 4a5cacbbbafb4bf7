use std::collections::HashMap;

use serde::Serialize;

use crate::domain::catalog::{NodeKind, Translation};
use crate::domain::tree::TreeNode;
use crate::domain::types::{Locale, NodeId};
use crate::dto::catalog::format_price_cents;

/// One row of the public pricing page, translated where a translation for
/// the requested locale exists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceRowDto {
    pub name: String,
    pub description: Option<String>,
    pub depth: usize,
    pub is_service: bool,
    pub duration_minutes: Option<i32>,
    pub price: Option<String>,
}

/// Flatten the active tree into pricing rows, swapping in per-locale names
/// and descriptions.
pub fn pricing_rows(
    tree: &[TreeNode],
    translations: &[Translation],
    locale: Option<&Locale>,
) -> Vec<PriceRowDto> {
    let by_node: HashMap<NodeId, &Translation> = match locale {
        Some(locale) => translations
            .iter()
            .filter(|t| t.locale == *locale)
            .map(|t| (t.node_id, t))
            .collect(),
        None => HashMap::new(),
    };

    let mut rows = Vec::new();
    push_rows(tree, 0, &by_node, &mut rows);
    rows
}

fn push_rows(
    level: &[TreeNode],
    depth: usize,
    by_node: &HashMap<NodeId, &Translation>,
    rows: &mut Vec<PriceRowDto>,
) {
    for entry in level {
        let node = &entry.node;
        let translation = by_node.get(&node.id);
        rows.push(PriceRowDto {
            name: translation
                .map(|t| t.name.clone())
                .unwrap_or_else(|| node.name.as_str().to_string()),
            description: translation
                .and_then(|t| t.description.clone())
                .or_else(|| node.description.clone()),
            depth,
            is_service: node.kind == NodeKind::Service,
            duration_minutes: node.duration_minutes,
            price: node.price_cents.map(format_price_cents),
        });
        push_rows(&entry.children, depth + 1, by_node, rows);
    }
}
