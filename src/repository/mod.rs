use std::collections::HashSet;

use crate::db::{DbConnection, DbPool};
use crate::domain::booking::NewBooking;
use crate::domain::catalog::{CatalogNode, CatalogNodeUpdate, NewCatalogNode, Translation};
use crate::domain::schedule::{NewTimeOffEntry, TimeOffEntry, WeeklyScheduleEntry};
use crate::domain::staff::{NewStaffMember, StaffMember, StaffProfileUpdate};
use crate::domain::types::{NodeId, StaffId, TimeOffId};

pub mod booking;
pub mod catalog;
pub mod errors;
pub mod media;
pub mod schedule;
pub mod staff;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Query parameters used when listing staff members.
#[derive(Debug, Clone, Default)]
pub struct StaffListQuery {
    /// Include archived (inactive) members.
    pub include_archived: bool,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl StaffListQuery {
    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters used when listing catalog nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeListQuery {
    /// Restrict to active nodes (the public pricing page).
    pub only_active: bool,
}

impl NodeListQuery {
    pub fn active_only(mut self) -> Self {
        self.only_active = true;
        self
    }
}

/// Outcome of a staff-services symmetric-difference update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServicesDiff {
    pub added: usize,
    pub removed: usize,
}

/// Outcome of a cascading node deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub nodes_deleted: usize,
    pub bookings_deleted: usize,
}

/// Read-only operations for staff members.
pub trait StaffReader {
    /// List staff members matching the supplied query parameters.
    fn list_staff(&self, query: StaffListQuery) -> RepositoryResult<(usize, Vec<StaffMember>)>;
    /// Retrieve a staff member by identifier.
    fn get_staff_by_id(&self, id: StaffId) -> RepositoryResult<Option<StaffMember>>;
    /// Ids of the catalog nodes a staff member currently offers.
    fn list_staff_service_ids(&self, staff_id: StaffId) -> RepositoryResult<HashSet<NodeId>>;
}

/// Write operations for staff members.
pub trait StaffWriter {
    /// Persist a new staff member and return the stored record.
    fn create_staff(&self, staff: &NewStaffMember) -> RepositoryResult<StaffMember>;
    /// Update profile attributes in place.
    fn update_staff_profile(
        &self,
        id: StaffId,
        update: &StaffProfileUpdate,
    ) -> RepositoryResult<usize>;
    /// Set or clear the avatar URL.
    fn set_staff_avatar(&self, id: StaffId, avatar_url: Option<&str>) -> RepositoryResult<usize>;
    /// Replace the offered-services set wholesale: the difference between
    /// `submitted` and the stored set determines connects/disconnects, both
    /// applied in one transaction.
    fn set_staff_services(
        &self,
        staff_id: StaffId,
        submitted: &HashSet<NodeId>,
    ) -> RepositoryResult<ServicesDiff>;
}

/// Read-only operations for weekly schedules and time off.
pub trait ScheduleReader {
    /// The stored weekly rows for a staff member, ordered by weekday.
    fn get_weekly_schedule(&self, staff_id: StaffId)
    -> RepositoryResult<Vec<WeeklyScheduleEntry>>;
    /// All time-off entries for a staff member, ordered by date.
    fn list_time_off(&self, staff_id: StaffId) -> RepositoryResult<Vec<TimeOffEntry>>;
}

/// Write operations for weekly schedules and time off.
pub trait ScheduleWriter {
    /// Replace all seven weekday rows in one transaction; partial writes are
    /// not possible.
    fn replace_weekly_schedule(
        &self,
        staff_id: StaffId,
        entries: &[WeeklyScheduleEntry; 7],
    ) -> RepositoryResult<usize>;
    /// Insert one row per expanded calendar day in one transaction.
    fn add_time_off(&self, entries: &[NewTimeOffEntry]) -> RepositoryResult<usize>;
    /// Delete a single entry scoped to its staff member.
    fn delete_time_off(&self, staff_id: StaffId, time_off_id: TimeOffId)
    -> RepositoryResult<usize>;
}

/// Read-only operations for the category/service catalog.
pub trait CatalogReader {
    /// Flat node list; tree shaping is the caller's concern.
    fn list_nodes(&self, query: NodeListQuery) -> RepositoryResult<Vec<CatalogNode>>;
    /// Retrieve a node by identifier.
    fn get_node_by_id(&self, id: NodeId) -> RepositoryResult<Option<CatalogNode>>;
    /// Translations of one node.
    fn list_translations(&self, node_id: NodeId) -> RepositoryResult<Vec<Translation>>;
    /// Translations of every node, for bulk page rendering.
    fn list_all_translations(&self) -> RepositoryResult<Vec<Translation>>;
}

/// Write operations for the category/service catalog.
pub trait CatalogWriter {
    /// Persist a new node and return the stored record.
    fn create_node(&self, node: &NewCatalogNode) -> RepositoryResult<CatalogNode>;
    /// Update a node in place. A submitted parent equal to the node's own id
    /// keeps the previously stored parent.
    fn update_node(&self, id: NodeId, update: &CatalogNodeUpdate) -> RepositoryResult<usize>;
    /// Delete a node, all its descendants, and every booking referencing the
    /// closure, atomically.
    fn delete_node_cascade(&self, id: NodeId) -> RepositoryResult<CascadeOutcome>;
    /// Replace the `(node, locale)` translation.
    fn upsert_translation(&self, translation: &Translation) -> RepositoryResult<usize>;
}

/// Read-only operations for bookings.
pub trait BookingReader {
    /// Number of bookings referencing a node.
    fn count_bookings_for_node(&self, node_id: NodeId) -> RepositoryResult<i64>;
}

/// Write operations for bookings (seeding and tests; the public booking flow
/// lives elsewhere).
pub trait BookingWriter {
    fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<usize>;
}

/// String-match maintenance of stored image URLs, used by the offline WebP
/// migration tool.
pub trait ImageRefStore {
    /// Rewrite every known image-URL column matching `before` to `after`.
    fn repoint_image_url(&self, before: &str, after: &str) -> RepositoryResult<usize>;
    /// Number of rows anywhere still referencing `url`.
    fn count_image_url_refs(&self, url: &str) -> RepositoryResult<i64>;
}
