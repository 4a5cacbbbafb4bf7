//! Exact-string maintenance of stored image URLs.
//!
//! Every column known to hold an uploaded-image URL is listed here; the
//! offline WebP migration tool drives these methods after converting files.

use diesel::prelude::*;

use crate::repository::{DieselRepository, ImageRefStore, RepositoryResult};

impl ImageRefStore for DieselRepository {
    fn repoint_image_url(&self, before: &str, after: &str) -> RepositoryResult<usize> {
        use crate::schema::{catalog_nodes, staff};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            let mut affected = diesel::update(
                staff::table.filter(staff::avatar_url.eq(Some(before))),
            )
            .set(staff::avatar_url.eq(Some(after)))
            .execute(conn)?;

            affected += diesel::update(
                catalog_nodes::table.filter(catalog_nodes::cover_image_url.eq(Some(before))),
            )
            .set(catalog_nodes::cover_image_url.eq(Some(after)))
            .execute(conn)?;

            diesel::result::QueryResult::Ok(affected)
        })?;

        Ok(affected)
    }

    fn count_image_url_refs(&self, url: &str) -> RepositoryResult<i64> {
        use crate::schema::{catalog_nodes, staff};

        let mut conn = self.conn()?;

        let staff_refs: i64 = staff::table
            .filter(staff::avatar_url.eq(Some(url)))
            .count()
            .get_result(&mut conn)?;
        let node_refs: i64 = catalog_nodes::table
            .filter(catalog_nodes::cover_image_url.eq(Some(url)))
            .count()
            .get_result(&mut conn)?;

        Ok(staff_refs + node_refs)
    }
}
