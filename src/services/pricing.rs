use crate::domain::tree::build_tree;
use crate::domain::types::Locale;
use crate::dto::pricing::{PriceRowDto, pricing_rows};
use crate::repository::{CatalogReader, NodeListQuery};

use super::{ServiceError, ServiceResult};

/// The public pricing page: the active-only tree with names and
/// descriptions swapped for the requested locale where translated.
pub fn show_pricing<R>(locale: Option<Locale>, repo: &R) -> ServiceResult<Vec<PriceRowDto>>
where
    R: CatalogReader,
{
    let nodes = match repo.list_nodes(NodeListQuery::default().active_only()) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::error!("Failed to list catalog nodes: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let translations = match repo.list_all_translations() {
        Ok(translations) => translations,
        Err(e) => {
            log::error!("Failed to list translations: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(pricing_rows(
        &build_tree(nodes),
        &translations,
        locale.as_ref(),
    ))
}
