//! Builds the sorted category/service tree from the flat node table.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::catalog::CatalogNode;
use crate::domain::types::NodeId;

/// One node of the rendered tree with its sorted children.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub node: CatalogNode,
    pub children: Vec<TreeNode>,
}

/// Case- and diacritic-insensitive sort key (base sensitivity): decompose,
/// drop combining marks, lowercase.
pub fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Turn a flat node list into a tree.
///
/// A node whose `parent_id` does not resolve to another node in the input
/// (or points at itself) is treated as a root. Siblings are sorted by
/// collation key, then raw name, then id, so the output is identical for
/// identical input regardless of input order.
pub fn build_tree(nodes: Vec<CatalogNode>) -> Vec<TreeNode> {
    let known: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();

    let mut children: HashMap<NodeId, Vec<CatalogNode>> = HashMap::new();
    let mut roots = Vec::new();
    for node in nodes {
        match node.parent_id.filter(|p| *p != node.id && known.contains(p)) {
            Some(parent) => children.entry(parent).or_default().push(node),
            None => roots.push(node),
        }
    }

    let mut tree: Vec<TreeNode> = roots
        .into_iter()
        .map(|node| attach_children(node, &mut children))
        .collect();
    sort_siblings(&mut tree);
    tree
}

fn attach_children(
    node: CatalogNode,
    children: &mut HashMap<NodeId, Vec<CatalogNode>>,
) -> TreeNode {
    let mut kids: Vec<TreeNode> = children
        .remove(&node.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach_children(child, children))
        .collect();
    sort_siblings(&mut kids);
    TreeNode {
        node,
        children: kids,
    }
}

fn sort_siblings(siblings: &mut [TreeNode]) {
    siblings.sort_by(|a, b| {
        collation_key(a.node.name.as_str())
            .cmp(&collation_key(b.node.name.as_str()))
            .then_with(|| a.node.name.as_str().cmp(b.node.name.as_str()))
            .then_with(|| a.node.id.cmp(&b.node.id))
    });
}
