use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::catalog::{CatalogNode, CatalogNodeUpdate, NewCatalogNode, Translation};
use crate::domain::types::NodeId;
use crate::models::catalog::{CatalogNode as DbCatalogNode, NewCatalogNode as DbNewCatalogNode};
use crate::models::translation::{NewTranslation as DbNewTranslation, Translation as DbTranslation};
use crate::repository::{
    CascadeOutcome, CatalogReader, CatalogWriter, DieselRepository, NodeListQuery, RepositoryError,
    RepositoryResult,
};

/// Frontier iterations allowed when collecting a subtree. The closure query
/// walks one level per iteration, so this bounds tree depth; exceeding it
/// means a malformed parent cycle and aborts the transaction.
const MAX_TREE_DEPTH: usize = 64;

impl CatalogReader for DieselRepository {
    fn list_nodes(&self, query: NodeListQuery) -> RepositoryResult<Vec<CatalogNode>> {
        use crate::schema::catalog_nodes;

        let mut conn = self.conn()?;

        let mut items = catalog_nodes::table.into_boxed::<diesel::sqlite::Sqlite>();
        if query.only_active {
            items = items.filter(catalog_nodes::is_active.eq(true));
        }

        let items = items
            .order(catalog_nodes::id.asc())
            .load::<DbCatalogNode>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<CatalogNode>, _>>()?;

        Ok(items)
    }

    fn get_node_by_id(&self, id: NodeId) -> RepositoryResult<Option<CatalogNode>> {
        use crate::schema::catalog_nodes;

        let mut conn = self.conn()?;

        let node = catalog_nodes::table
            .find(id.get())
            .first::<DbCatalogNode>(&mut conn)
            .optional()?;

        Ok(node.map(TryInto::try_into).transpose()?)
    }

    fn list_translations(&self, node_id: NodeId) -> RepositoryResult<Vec<Translation>> {
        use crate::schema::catalog_translations;

        let mut conn = self.conn()?;

        let rows = catalog_translations::table
            .filter(catalog_translations::node_id.eq(node_id.get()))
            .order(catalog_translations::locale.asc())
            .load::<DbTranslation>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Translation>, _>>()?)
    }

    fn list_all_translations(&self) -> RepositoryResult<Vec<Translation>> {
        use crate::schema::catalog_translations;

        let mut conn = self.conn()?;

        let rows = catalog_translations::table
            .order((
                catalog_translations::node_id.asc(),
                catalog_translations::locale.asc(),
            ))
            .load::<DbTranslation>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Translation>, _>>()?)
    }
}

impl CatalogWriter for DieselRepository {
    fn create_node(&self, node: &NewCatalogNode) -> RepositoryResult<CatalogNode> {
        use crate::schema::catalog_nodes;

        let mut conn = self.conn()?;
        let db_node: DbNewCatalogNode = node.clone().into();

        let created = diesel::insert_into(catalog_nodes::table)
            .values(db_node)
            .get_result::<DbCatalogNode>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_node(&self, id: NodeId, update: &CatalogNodeUpdate) -> RepositoryResult<usize> {
        use crate::schema::catalog_nodes;

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            // A node must never become its own parent; such a submission
            // keeps the previously stored parent.
            let new_parent: Option<i32> = if update.parent_id == Some(id) {
                catalog_nodes::table
                    .find(id.get())
                    .select(catalog_nodes::parent_id)
                    .first::<Option<i32>>(conn)?
            } else {
                update.parent_id.map(NodeId::get)
            };

            diesel::update(catalog_nodes::table.find(id.get()))
                .set((
                    catalog_nodes::parent_id.eq(new_parent),
                    catalog_nodes::name.eq(update.name.as_str()),
                    catalog_nodes::slug.eq(update.slug.as_str()),
                    catalog_nodes::description.eq(update.description.as_deref()),
                    catalog_nodes::duration_minutes.eq(update.duration_minutes),
                    catalog_nodes::price_cents.eq(update.price_cents),
                    catalog_nodes::is_active.eq(update.is_active),
                    catalog_nodes::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)
        })?;

        Ok(affected)
    }

    fn delete_node_cascade(&self, id: NodeId) -> RepositoryResult<CascadeOutcome> {
        use crate::schema::{bookings, catalog_nodes, catalog_translations, staff_services};

        let mut conn = self.conn()?;

        let outcome = conn.transaction::<_, RepositoryError, _>(|conn| {
            let root = id.get();
            let mut to_delete = vec![root];
            let mut seen: HashSet<i32> = HashSet::from([root]);
            let mut frontier = vec![root];
            let mut depth = 0usize;

            // Breadth-first closure over parent_id, one level per query.
            while !frontier.is_empty() {
                depth += 1;
                if depth > MAX_TREE_DEPTH {
                    return Err(RepositoryError::ValidationError(
                        "catalog subtree exceeds maximum depth; parent cycle suspected"
                            .to_string(),
                    ));
                }

                let parents: Vec<Option<i32>> = frontier.iter().map(|id| Some(*id)).collect();
                let children: Vec<i32> = catalog_nodes::table
                    .filter(catalog_nodes::parent_id.eq_any(parents))
                    .select(catalog_nodes::id)
                    .load(conn)?;

                frontier = children
                    .into_iter()
                    .filter(|child| seen.insert(*child))
                    .collect();
                to_delete.extend(&frontier);
            }

            // Dependent records go first to keep references intact at every
            // point inside the transaction.
            let bookings_deleted = diesel::delete(
                bookings::table.filter(bookings::node_id.eq_any(to_delete.clone())),
            )
            .execute(conn)?;
            diesel::delete(
                staff_services::table.filter(staff_services::node_id.eq_any(to_delete.clone())),
            )
            .execute(conn)?;
            diesel::delete(
                catalog_translations::table
                    .filter(catalog_translations::node_id.eq_any(to_delete.clone())),
            )
            .execute(conn)?;

            let descendants: Vec<i32> =
                to_delete.iter().copied().filter(|n| *n != root).collect();
            let mut nodes_deleted = diesel::delete(
                catalog_nodes::table.filter(catalog_nodes::id.eq_any(descendants)),
            )
            .execute(conn)?;
            nodes_deleted += diesel::delete(catalog_nodes::table.find(root)).execute(conn)?;

            Ok(CascadeOutcome {
                nodes_deleted,
                bookings_deleted,
            })
        })?;

        Ok(outcome)
    }

    fn upsert_translation(&self, translation: &Translation) -> RepositoryResult<usize> {
        use crate::schema::catalog_translations;

        let mut conn = self.conn()?;
        let db_translation: DbNewTranslation = translation.clone().into();

        let affected = conn.transaction(|conn| {
            diesel::delete(
                catalog_translations::table
                    .filter(catalog_translations::node_id.eq(translation.node_id.get()))
                    .filter(catalog_translations::locale.eq(translation.locale.as_str())),
            )
            .execute(conn)?;

            diesel::insert_into(catalog_translations::table)
                .values(db_translation)
                .execute(conn)
        })?;

        Ok(affected)
    }
}
