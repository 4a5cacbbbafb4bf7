use std::collections::HashSet;

use crate::domain::tree::build_tree;
use crate::domain::types::NodeId;
use crate::dto::catalog::{NodeDetailDto, TreeRowDto, flatten_tree};
use crate::forms::catalog::{AddNodeFormPayload, TranslationFormPayload, UpdateNodeFormPayload};
use crate::repository::{CatalogReader, CatalogWriter, NodeListQuery};

use super::{ServiceError, ServiceResult};

/// The admin catalog page: every node, flattened in tree order.
pub fn show_catalog<R>(repo: &R) -> ServiceResult<Vec<TreeRowDto>>
where
    R: CatalogReader,
{
    match repo.list_nodes(NodeListQuery::default()) {
        Ok(nodes) => Ok(flatten_tree(&build_tree(nodes), &HashSet::new())),
        Err(e) => {
            log::error!("Failed to list catalog nodes: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The node edit page: stored attributes plus per-locale translations.
pub fn show_node<R>(id: NodeId, repo: &R) -> ServiceResult<NodeDetailDto>
where
    R: CatalogReader,
{
    let node = match repo.get_node_by_id(id) {
        Ok(Some(node)) => node,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get catalog node: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let translations = match repo.list_translations(id) {
        Ok(translations) => translations,
        Err(e) => {
            log::error!("Failed to list translations: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(NodeDetailDto::new(node, translations))
}

pub fn add_node<R>(payload: AddNodeFormPayload, repo: &R) -> ServiceResult<bool>
where
    R: CatalogReader + CatalogWriter,
{
    if let Some(parent_id) = payload.node.parent_id {
        match repo.get_node_by_id(parent_id) {
            Ok(Some(_)) => {}
            Ok(None) => return Err(ServiceError::NotFound),
            Err(e) => {
                log::error!("Failed to get parent node: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    match repo.create_node(&payload.node) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create catalog node: {e}");
            Ok(false)
        }
    }
}

pub fn update_node<R>(id: NodeId, payload: UpdateNodeFormPayload, repo: &R) -> ServiceResult<bool>
where
    R: CatalogReader + CatalogWriter,
{
    match repo.get_node_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get catalog node: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.update_node(id, &payload.update) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to update catalog node: {e}");
            Ok(false)
        }
    }
}

/// Delete a node and everything transitively beneath it, together with all
/// bookings referencing the subtree, in one transaction.
pub fn delete_node<R>(id: NodeId, repo: &R) -> ServiceResult<bool>
where
    R: CatalogReader + CatalogWriter,
{
    match repo.get_node_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get catalog node: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_node_cascade(id) {
        Ok(outcome) => {
            log::info!(
                "Deleted catalog subtree of node {id}: {} nodes, {} bookings",
                outcome.nodes_deleted,
                outcome.bookings_deleted
            );
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to delete catalog subtree: {e}");
            Ok(false)
        }
    }
}

pub fn save_translation<R>(
    node_id: NodeId,
    payload: TranslationFormPayload,
    repo: &R,
) -> ServiceResult<bool>
where
    R: CatalogReader + CatalogWriter,
{
    match repo.get_node_by_id(node_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get catalog node: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.upsert_translation(&payload.into_translation(node_id)) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to save translation: {e}");
            Ok(false)
        }
    }
}
