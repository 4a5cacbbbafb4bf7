//! Simple in-memory repository used for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use chrono::DateTime;

use crate::domain::booking::{Booking, NewBooking};
use crate::domain::catalog::{CatalogNode, CatalogNodeUpdate, NewCatalogNode, Translation};
use crate::domain::schedule::{NewTimeOffEntry, TimeOffEntry, WeeklyScheduleEntry};
use crate::domain::staff::{NewStaffMember, StaffMember, StaffProfileUpdate};
use crate::domain::types::{BookingId, NodeId, StaffId, TimeOffId};
use crate::repository::{
    BookingReader, BookingWriter, CascadeOutcome, CatalogReader, CatalogWriter, NodeListQuery,
    RepositoryResult, ScheduleReader, ScheduleWriter, ServicesDiff, StaffListQuery, StaffReader,
    StaffWriter,
};

#[derive(Default)]
pub struct TestRepository {
    staff: RefCell<Vec<StaffMember>>,
    schedules: RefCell<HashMap<i32, Vec<WeeklyScheduleEntry>>>,
    time_off: RefCell<Vec<TimeOffEntry>>,
    nodes: RefCell<Vec<CatalogNode>>,
    translations: RefCell<Vec<Translation>>,
    staff_services: RefCell<HashSet<(i32, i32)>>,
    bookings: RefCell<Vec<Booking>>,
    next_id: Cell<i32>,
}

impl TestRepository {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1000),
            ..Self::default()
        }
    }

    pub fn with_staff(self, staff: Vec<StaffMember>) -> Self {
        *self.staff.borrow_mut() = staff;
        self
    }

    pub fn with_nodes(self, nodes: Vec<CatalogNode>) -> Self {
        *self.nodes.borrow_mut() = nodes;
        self
    }

    pub fn with_translations(self, translations: Vec<Translation>) -> Self {
        *self.translations.borrow_mut() = translations;
        self
    }

    pub fn with_bookings(self, bookings: Vec<Booking>) -> Self {
        *self.bookings.borrow_mut() = bookings;
        self
    }

    pub fn time_off_entries(&self) -> Vec<TimeOffEntry> {
        self.time_off.borrow().clone()
    }

    pub fn service_links(&self) -> HashSet<(i32, i32)> {
        self.staff_services.borrow().clone()
    }

    pub fn link_service(&self, staff_id: StaffId, node_id: NodeId) {
        self.staff_services
            .borrow_mut()
            .insert((staff_id.get(), node_id.get()));
    }

    fn alloc_id(&self) -> i32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn timestamp() -> chrono::NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }
}

impl StaffReader for TestRepository {
    fn list_staff(&self, query: StaffListQuery) -> RepositoryResult<(usize, Vec<StaffMember>)> {
        let mut items: Vec<StaffMember> = self.staff.borrow().clone();
        if !query.include_archived {
            items.retain(|s| s.is_active);
        }
        let total = items.len();
        Ok((total, items))
    }

    fn get_staff_by_id(&self, id: StaffId) -> RepositoryResult<Option<StaffMember>> {
        Ok(self.staff.borrow().iter().find(|s| s.id == id).cloned())
    }

    fn list_staff_service_ids(&self, staff_id: StaffId) -> RepositoryResult<HashSet<NodeId>> {
        Ok(self
            .staff_services
            .borrow()
            .iter()
            .filter(|(sid, _)| *sid == staff_id.get())
            .filter_map(|(_, nid)| NodeId::new(*nid).ok())
            .collect())
    }
}

impl StaffWriter for TestRepository {
    fn create_staff(&self, staff: &NewStaffMember) -> RepositoryResult<StaffMember> {
        let member = StaffMember {
            id: StaffId::new(self.alloc_id()).expect("generated id is positive"),
            name: staff.name.clone(),
            phone: staff.phone.clone(),
            email: staff.email.clone(),
            birth_date: staff.birth_date,
            bio: staff.bio.clone(),
            avatar_url: None,
            is_active: true,
            created_at: Self::timestamp(),
            updated_at: Self::timestamp(),
        };
        self.staff.borrow_mut().push(member.clone());
        Ok(member)
    }

    fn update_staff_profile(
        &self,
        id: StaffId,
        update: &StaffProfileUpdate,
    ) -> RepositoryResult<usize> {
        let mut staff = self.staff.borrow_mut();
        match staff.iter_mut().find(|s| s.id == id) {
            Some(member) => {
                member.name = update.name.clone();
                member.phone = update.phone.clone();
                member.email = update.email.clone();
                member.birth_date = update.birth_date;
                member.bio = update.bio.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn set_staff_avatar(&self, id: StaffId, avatar_url: Option<&str>) -> RepositoryResult<usize> {
        let mut staff = self.staff.borrow_mut();
        match staff.iter_mut().find(|s| s.id == id) {
            Some(member) => {
                member.avatar_url = avatar_url.map(ToString::to_string);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn set_staff_services(
        &self,
        staff_id: StaffId,
        submitted: &HashSet<NodeId>,
    ) -> RepositoryResult<ServicesDiff> {
        let mut links = self.staff_services.borrow_mut();
        let existing: HashSet<i32> = links
            .iter()
            .filter(|(sid, _)| *sid == staff_id.get())
            .map(|(_, nid)| *nid)
            .collect();
        let submitted: HashSet<i32> = submitted.iter().map(|id| id.get()).collect();

        let mut diff = ServicesDiff::default();
        for node_id in submitted.difference(&existing) {
            links.insert((staff_id.get(), *node_id));
            diff.added += 1;
        }
        for node_id in existing.difference(&submitted) {
            links.remove(&(staff_id.get(), *node_id));
            diff.removed += 1;
        }
        Ok(diff)
    }
}

impl ScheduleReader for TestRepository {
    fn get_weekly_schedule(
        &self,
        staff_id: StaffId,
    ) -> RepositoryResult<Vec<WeeklyScheduleEntry>> {
        Ok(self
            .schedules
            .borrow()
            .get(&staff_id.get())
            .cloned()
            .unwrap_or_default())
    }

    fn list_time_off(&self, staff_id: StaffId) -> RepositoryResult<Vec<TimeOffEntry>> {
        let mut entries: Vec<TimeOffEntry> = self
            .time_off
            .borrow()
            .iter()
            .filter(|t| t.staff_id == staff_id)
            .cloned()
            .collect();
        entries.sort_by_key(|t| (t.date, t.id));
        Ok(entries)
    }
}

impl ScheduleWriter for TestRepository {
    fn replace_weekly_schedule(
        &self,
        staff_id: StaffId,
        entries: &[WeeklyScheduleEntry; 7],
    ) -> RepositoryResult<usize> {
        self.schedules
            .borrow_mut()
            .insert(staff_id.get(), entries.to_vec());
        Ok(entries.len())
    }

    fn add_time_off(&self, entries: &[NewTimeOffEntry]) -> RepositoryResult<usize> {
        let mut stored = self.time_off.borrow_mut();
        for entry in entries {
            stored.push(TimeOffEntry {
                id: TimeOffId::new(self.alloc_id()).expect("generated id is positive"),
                staff_id: entry.staff_id,
                date: entry.date,
                start_minutes: entry.start_minutes,
                end_minutes: entry.end_minutes,
                reason: entry.reason.clone(),
                created_at: Self::timestamp(),
            });
        }
        Ok(entries.len())
    }

    fn delete_time_off(
        &self,
        staff_id: StaffId,
        time_off_id: TimeOffId,
    ) -> RepositoryResult<usize> {
        let mut stored = self.time_off.borrow_mut();
        let before = stored.len();
        stored.retain(|t| !(t.id == time_off_id && t.staff_id == staff_id));
        Ok(before - stored.len())
    }
}

impl CatalogReader for TestRepository {
    fn list_nodes(&self, query: NodeListQuery) -> RepositoryResult<Vec<CatalogNode>> {
        let mut items: Vec<CatalogNode> = self.nodes.borrow().clone();
        if query.only_active {
            items.retain(|n| n.is_active);
        }
        items.sort_by_key(|n| n.id);
        Ok(items)
    }

    fn get_node_by_id(&self, id: NodeId) -> RepositoryResult<Option<CatalogNode>> {
        Ok(self.nodes.borrow().iter().find(|n| n.id == id).cloned())
    }

    fn list_translations(&self, node_id: NodeId) -> RepositoryResult<Vec<Translation>> {
        Ok(self
            .translations
            .borrow()
            .iter()
            .filter(|t| t.node_id == node_id)
            .cloned()
            .collect())
    }

    fn list_all_translations(&self) -> RepositoryResult<Vec<Translation>> {
        Ok(self.translations.borrow().clone())
    }
}

impl CatalogWriter for TestRepository {
    fn create_node(&self, node: &NewCatalogNode) -> RepositoryResult<CatalogNode> {
        let created = CatalogNode {
            id: NodeId::new(self.alloc_id()).expect("generated id is positive"),
            parent_id: node.parent_id,
            name: node.name.clone(),
            slug: node.slug.clone(),
            description: node.description.clone(),
            kind: node.kind,
            duration_minutes: node.duration_minutes,
            price_cents: node.price_cents,
            cover_image_url: None,
            is_active: true,
            created_at: Self::timestamp(),
            updated_at: Self::timestamp(),
        };
        self.nodes.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_node(&self, id: NodeId, update: &CatalogNodeUpdate) -> RepositoryResult<usize> {
        let mut nodes = self.nodes.borrow_mut();
        match nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                if update.parent_id != Some(id) {
                    node.parent_id = update.parent_id;
                }
                node.name = update.name.clone();
                node.slug = update.slug.clone();
                node.description = update.description.clone();
                node.duration_minutes = update.duration_minutes;
                node.price_cents = update.price_cents;
                node.is_active = update.is_active;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_node_cascade(&self, id: NodeId) -> RepositoryResult<CascadeOutcome> {
        let mut to_delete: HashSet<NodeId> = HashSet::from([id]);
        let mut frontier = vec![id];
        while !frontier.is_empty() {
            let next: Vec<NodeId> = self
                .nodes
                .borrow()
                .iter()
                .filter(|n| {
                    n.parent_id
                        .map(|p| frontier.contains(&p) && !to_delete.contains(&n.id))
                        .unwrap_or(false)
                })
                .map(|n| n.id)
                .collect();
            for node_id in &next {
                to_delete.insert(*node_id);
            }
            frontier = next;
        }

        let mut bookings = self.bookings.borrow_mut();
        let bookings_before = bookings.len();
        bookings.retain(|b| !to_delete.contains(&b.node_id));
        let bookings_deleted = bookings_before - bookings.len();

        self.staff_services
            .borrow_mut()
            .retain(|(_, nid)| NodeId::new(*nid).map(|n| !to_delete.contains(&n)).unwrap_or(true));
        self.translations
            .borrow_mut()
            .retain(|t| !to_delete.contains(&t.node_id));

        let mut nodes = self.nodes.borrow_mut();
        let nodes_before = nodes.len();
        nodes.retain(|n| !to_delete.contains(&n.id));
        let nodes_deleted = nodes_before - nodes.len();

        Ok(CascadeOutcome {
            nodes_deleted,
            bookings_deleted,
        })
    }

    fn upsert_translation(&self, translation: &Translation) -> RepositoryResult<usize> {
        let mut stored = self.translations.borrow_mut();
        stored.retain(|t| !(t.node_id == translation.node_id && t.locale == translation.locale));
        stored.push(translation.clone());
        Ok(1)
    }
}

impl BookingReader for TestRepository {
    fn count_bookings_for_node(&self, node_id: NodeId) -> RepositoryResult<i64> {
        Ok(self
            .bookings
            .borrow()
            .iter()
            .filter(|b| b.node_id == node_id)
            .count() as i64)
    }
}

impl BookingWriter for TestRepository {
    fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<usize> {
        self.bookings.borrow_mut().push(Booking {
            id: BookingId::new(self.alloc_id()).expect("generated id is positive"),
            staff_id: booking.staff_id,
            node_id: booking.node_id,
            starts_at: booking.starts_at,
            customer_name: booking.customer_name.clone(),
            customer_phone: booking.customer_phone.clone(),
            created_at: Self::timestamp(),
        });
        Ok(1)
    }
}
