use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;

use pushkind_salon::domain::booking::NewBooking;
use pushkind_salon::domain::catalog::{NewCatalogNode, NodeKind, Translation};
use pushkind_salon::domain::schedule::{NewTimeOffEntry, WeeklyScheduleEntry};
use pushkind_salon::domain::staff::{NewStaffMember, StaffMember};
use pushkind_salon::domain::time::MINUTES_PER_DAY;
use pushkind_salon::domain::types::{Locale, NodeId, NodeName, Slug, StaffName, Weekday};
use pushkind_salon::repository::{
    BookingReader, BookingWriter, CatalogReader, CatalogWriter, DieselRepository, ScheduleReader,
    ScheduleWriter, StaffReader, StaffWriter,
};
use pushkind_salon::schema::{catalog_nodes, weekly_schedule};

mod common;

fn create_member(repo: &DieselRepository, name: &str) -> StaffMember {
    repo.create_staff(&NewStaffMember {
        name: StaffName::new(name).expect("valid staff name"),
        phone: "+100".to_string(),
        email: None,
        birth_date: None,
        bio: None,
    })
    .expect("should create staff member")
}

fn create_node(
    repo: &DieselRepository,
    name: &str,
    parent: Option<NodeId>,
    kind: NodeKind,
) -> NodeId {
    repo.create_node(&NewCatalogNode {
        parent_id: parent,
        name: NodeName::new(name).expect("valid node name"),
        slug: Slug::new(name.to_lowercase()).expect("valid slug"),
        description: None,
        kind,
        duration_minutes: None,
        price_cents: None,
    })
    .expect("should create catalog node")
    .id
}

fn open_day(weekday: u8, start: i32, end: i32) -> WeeklyScheduleEntry {
    WeeklyScheduleEntry {
        weekday: Weekday::new(weekday).expect("valid weekday"),
        is_closed: false,
        start_minutes: start,
        end_minutes: end,
    }
}

fn full_week(start: i32, end: i32) -> [WeeklyScheduleEntry; 7] {
    Weekday::ALL.map(|weekday| WeeklyScheduleEntry {
        weekday,
        is_closed: false,
        start_minutes: start,
        end_minutes: end,
    })
}

#[test]
fn weekly_schedule_save_keeps_exactly_one_row_per_weekday() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let member = create_member(&repo, "Anna");

    repo.replace_weekly_schedule(member.id, &full_week(540, 1080))
        .expect("first save should succeed");

    let mut second = full_week(600, 1200);
    second[2] = WeeklyScheduleEntry::closed(Weekday::new(2).expect("valid weekday"));
    repo.replace_weekly_schedule(member.id, &second)
        .expect("second save should succeed");

    let mut conn = test_db.pool().get().expect("should get connection");
    let total: i64 = weekly_schedule::table
        .filter(weekly_schedule::staff_id.eq(member.id.get()))
        .count()
        .get_result(&mut conn)
        .expect("should count schedule rows");
    assert_eq!(total, 7);

    let stored = repo
        .get_weekly_schedule(member.id)
        .expect("should load schedule");
    assert_eq!(stored.len(), 7);
    assert!(stored[2].is_closed);
    assert_eq!(stored[2].start_minutes, 0);
    assert_eq!(stored[3], open_day(3, 600, 1200));
}

#[test]
fn time_off_range_inserts_one_row_per_day() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let member = create_member(&repo, "Anna");

    let entries: Vec<NewTimeOffEntry> = (1..=3)
        .map(|day| NewTimeOffEntry {
            staff_id: member.id,
            date: NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date"),
            start_minutes: 0,
            end_minutes: MINUTES_PER_DAY,
            reason: Some("holiday".to_string()),
        })
        .collect();
    let inserted = repo.add_time_off(&entries).expect("should insert time off");
    assert_eq!(inserted, 3);

    let stored = repo.list_time_off(member.id).expect("should list time off");
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|e| e.is_whole_day()));
    assert_eq!(
        stored[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    );

    let removed = repo
        .delete_time_off(member.id, stored[1].id)
        .expect("should delete time off");
    assert_eq!(removed, 1);
    assert_eq!(
        repo.list_time_off(member.id)
            .expect("should list time off")
            .len(),
        2
    );

    // Scoped to the owning member: a different staff id removes nothing.
    let other = create_member(&repo, "Boris");
    let removed = repo
        .delete_time_off(other.id, stored[0].id)
        .expect("delete with wrong owner should run");
    assert_eq!(removed, 0);
}

#[test]
fn cascade_delete_removes_subtree_bookings_and_links() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let member = create_member(&repo, "Anna");

    let a = create_node(&repo, "A", None, NodeKind::Category);
    let b = create_node(&repo, "B", Some(a), NodeKind::Category);
    let c = create_node(&repo, "C", Some(a), NodeKind::Service);
    let d = create_node(&repo, "D", Some(b), NodeKind::Service);
    let other = create_node(&repo, "Other", None, NodeKind::Service);

    for node_id in [c, d] {
        repo.create_booking(&NewBooking {
            staff_id: member.id,
            node_id,
            starts_at: Utc::now().naive_utc(),
            customer_name: "Customer".to_string(),
            customer_phone: String::new(),
        })
        .expect("should create booking");
    }
    repo.set_staff_services(member.id, &HashSet::from([c, other]))
        .expect("should link services");
    repo.upsert_translation(&Translation {
        node_id: d,
        locale: Locale::new("de").expect("valid locale"),
        name: "D auf Deutsch".to_string(),
        description: None,
    })
    .expect("should store translation");

    let outcome = repo
        .delete_node_cascade(a)
        .expect("cascade delete should succeed");
    assert_eq!(outcome.nodes_deleted, 4);
    assert_eq!(outcome.bookings_deleted, 2);

    for node_id in [a, b, c, d] {
        assert!(
            repo.get_node_by_id(node_id)
                .expect("lookup should run")
                .is_none()
        );
        assert_eq!(
            repo.count_bookings_for_node(node_id)
                .expect("count should run"),
            0
        );
    }
    assert!(
        repo.get_node_by_id(other)
            .expect("lookup should run")
            .is_some()
    );
    // The link to the untouched node survives.
    assert_eq!(
        repo.list_staff_service_ids(member.id)
            .expect("should list links"),
        HashSet::from([other])
    );
}

#[test]
fn cascade_delete_aborts_whole_transaction_on_depth_guard() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    // A parent chain deeper than the BFS guard allows.
    let root = create_node(&repo, "chain-0", None, NodeKind::Category);
    let mut parent = root;
    for i in 1..=70 {
        parent = create_node(&repo, &format!("chain-{i}"), Some(parent), NodeKind::Category);
    }

    let err = repo.delete_node_cascade(root);
    assert!(err.is_err());

    let mut conn = test_db.pool().get().expect("should get connection");
    let total: i64 = catalog_nodes::table
        .count()
        .get_result(&mut conn)
        .expect("should count nodes");
    assert_eq!(total, 71, "no partial deletion may be observable");
}

#[test]
fn cascade_delete_survives_a_parent_cycle() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let a = create_node(&repo, "A", None, NodeKind::Category);
    let b = create_node(&repo, "B", Some(a), NodeKind::Category);

    // Malformed data: point the root's parent back at its child.
    let mut conn = test_db.pool().get().expect("should get connection");
    diesel::update(catalog_nodes::table.find(a.get()))
        .set(catalog_nodes::parent_id.eq(Some(b.get())))
        .execute(&mut conn)
        .expect("should create cycle");

    let outcome = repo
        .delete_node_cascade(a)
        .expect("cycle must not loop forever");
    assert_eq!(outcome.nodes_deleted, 2);
}

#[test]
fn self_parent_update_keeps_stored_parent() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let parent = create_node(&repo, "Hair", None, NodeKind::Category);
    let child = create_node(&repo, "Cut", Some(parent), NodeKind::Service);

    let stored = repo
        .get_node_by_id(child)
        .expect("lookup should run")
        .expect("node exists");
    let mut update = pushkind_salon::domain::catalog::CatalogNodeUpdate {
        parent_id: Some(child),
        name: stored.name.clone(),
        slug: stored.slug.clone(),
        description: None,
        duration_minutes: Some(30),
        price_cents: Some(2000),
        is_active: true,
    };
    repo.update_node(child, &update)
        .expect("self-parent update should run");

    let stored = repo
        .get_node_by_id(child)
        .expect("lookup should run")
        .expect("node exists");
    assert_eq!(stored.parent_id, Some(parent));
    assert_eq!(stored.duration_minutes, Some(30));

    // A legitimate reparent still applies.
    let new_parent = create_node(&repo, "Spa", None, NodeKind::Category);
    update.parent_id = Some(new_parent);
    repo.update_node(child, &update).expect("reparent should run");
    let stored = repo
        .get_node_by_id(child)
        .expect("lookup should run")
        .expect("node exists");
    assert_eq!(stored.parent_id, Some(new_parent));
}

#[test]
fn staff_services_update_applies_symmetric_difference() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let member = create_member(&repo, "Anna");

    let keep = create_node(&repo, "Keep", None, NodeKind::Service);
    let drop = create_node(&repo, "Drop", None, NodeKind::Service);
    let add = create_node(&repo, "Add", None, NodeKind::Service);

    repo.set_staff_services(member.id, &HashSet::from([keep, drop]))
        .expect("initial selection should apply");

    let diff = repo
        .set_staff_services(member.id, &HashSet::from([keep, add]))
        .expect("update should apply");
    assert_eq!(diff.added, 1);
    assert_eq!(diff.removed, 1);
    assert_eq!(
        repo.list_staff_service_ids(member.id)
            .expect("should list links"),
        HashSet::from([keep, add])
    );
}

#[test]
fn translation_upsert_replaces_per_locale() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let node = create_node(&repo, "Cut", None, NodeKind::Service);

    for name in ["Alt", "Schnitt"] {
        repo.upsert_translation(&Translation {
            node_id: node,
            locale: Locale::new("de").expect("valid locale"),
            name: name.to_string(),
            description: None,
        })
        .expect("should store translation");
    }
    repo.upsert_translation(&Translation {
        node_id: node,
        locale: Locale::new("fr").expect("valid locale"),
        name: "Coupe".to_string(),
        description: None,
    })
    .expect("should store translation");

    let stored = repo
        .list_translations(node)
        .expect("should list translations");
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].locale.as_str(), "de");
    assert_eq!(stored[0].name, "Schnitt");
}

#[test]
fn staff_crud_round_trip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let member = create_member(&repo, "Anna");
    let loaded = repo
        .get_staff_by_id(member.id)
        .expect("lookup should run")
        .expect("member exists");
    assert_eq!(loaded.name.as_str(), "Anna");
    assert!(loaded.is_active);

    repo.set_staff_avatar(member.id, Some("/uploads/staff/1/a.jpg"))
        .expect("avatar update should run");
    let loaded = repo
        .get_staff_by_id(member.id)
        .expect("lookup should run")
        .expect("member exists");
    assert_eq!(loaded.avatar_url.as_deref(), Some("/uploads/staff/1/a.jpg"));

    let (total, listed) = repo
        .list_staff(pushkind_salon::repository::StaffListQuery::default())
        .expect("list should run");
    assert_eq!(total, 1);
    assert_eq!(listed[0].id, member.id);
}
