// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use cleaning_bot_domain::{Checklist, ChecklistItem, DomainError, NewChecklist};

use super::{create_test_checklist, create_test_persistence};
use crate::error::PersistenceError;
use crate::{BackendConnection, Persistence};

#[derive(QueryableByName)]
struct CountResult {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn count_items(persistence: &mut Persistence, checklist_id: i64) -> i64 {
    let BackendConnection::Sqlite(conn) = &mut persistence.conn else {
        panic!("tests run against SQLite");
    };
    diesel::sql_query(format!(
        "SELECT COUNT(*) AS count FROM checklist_items WHERE checklist_id = {checklist_id}"
    ))
    .get_result::<CountResult>(conn)
    .map(|r| r.count)
    .expect("Failed to count items")
}

#[test]
fn test_create_checklist_stores_items_in_order() {
    let mut persistence = create_test_persistence();

    let checklist: Checklist = persistence
        .create_checklist(&create_test_checklist("kitchen", 3))
        .unwrap();

    assert_eq!(checklist.name, "kitchen");
    assert_eq!(checklist.area, 3);
    let orders: Vec<i32> = checklist.items.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert!(checklist.items.iter().all(|i| i.item_type == "A" && !i.mark));
    assert_eq!(checklist.items[1].description, "Windows");
}

#[test]
fn test_mark_single_item_checklist() {
    let mut persistence = create_test_persistence();
    let created: Checklist = persistence
        .create_checklist(&NewChecklist::from_descriptions(
            "Form A",
            1,
            &[String::from("Mop the floor")],
        ))
        .unwrap();

    persistence.set_item_mark(created.id, 1, true).unwrap();
    let fetched: Checklist = persistence.get_checklist(created.id).unwrap();

    assert!(fetched.items[0].mark);
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.area, created.area);
    assert_eq!(fetched.created_at, created.created_at);
    assert_eq!(fetched.items[0].order, 1);
    assert_eq!(fetched.items[0].item_type, created.items[0].item_type);
    assert_eq!(fetched.items[0].description, "Mop the floor");
}

#[test]
fn test_get_checklist_by_id_and_name() {
    let mut persistence = create_test_persistence();
    let created: Checklist = persistence
        .create_checklist(&create_test_checklist("hall", 2))
        .unwrap();

    assert_eq!(persistence.get_checklist(created.id).unwrap(), created);
    assert_eq!(persistence.get_checklist_by_name("hall").unwrap(), created);
}

#[test]
fn test_unknown_checklist_is_not_found() {
    let mut persistence = create_test_persistence();

    assert!(matches!(
        persistence.get_checklist(42),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.get_checklist_by_name("nope"),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_list_checklists_by_area() {
    let mut persistence = create_test_persistence();
    persistence
        .create_checklist(&create_test_checklist("a", 1))
        .unwrap();
    persistence
        .create_checklist(&create_test_checklist("b", 2))
        .unwrap();
    persistence
        .create_checklist(&create_test_checklist("c", 1))
        .unwrap();

    let area_one: Vec<Checklist> = persistence.list_checklists_by_area(1).unwrap();

    let names: Vec<&str> = area_one.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert!(area_one.iter().all(|c| c.items.len() == 3));
    assert!(persistence.list_checklists_by_area(9).unwrap().is_empty());
}

#[test]
fn test_mark_then_delete_keeps_remaining_orders() {
    let mut persistence = create_test_persistence();
    let created: Checklist = persistence
        .create_checklist(&create_test_checklist("kitchen", 3))
        .unwrap();

    persistence.set_item_mark(created.id, 2, true).unwrap();
    persistence.delete_checklist_item(created.id, 1).unwrap();

    let checklist: Checklist = persistence.get_checklist(created.id).unwrap();
    let orders: Vec<i32> = checklist.items.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![2, 3]);
    assert!(checklist.item(2).unwrap().mark);
    assert!(!checklist.item(3).unwrap().mark);
    assert_eq!(checklist.marked_count(), 1);
}

#[test]
fn test_delete_then_mark_addresses_items_by_order() {
    let mut persistence = create_test_persistence();
    let created: Checklist = persistence
        .create_checklist(&create_test_checklist("kitchen", 3))
        .unwrap();

    persistence.delete_checklist_item(created.id, 1).unwrap();
    persistence.set_item_mark(created.id, 2, true).unwrap();

    let checklist: Checklist = persistence.get_checklist(created.id).unwrap();
    assert_eq!(checklist.items.len(), 2);
    assert_eq!(checklist.items[0].order, 2);
    assert!(checklist.items[0].mark);
    assert!(checklist.item(2).unwrap().mark);
    assert!(!checklist.item(3).unwrap().mark);
    assert_eq!(checklist.marked_count(), 1);

    let result = persistence.set_item_mark(created.id, 1, true);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_set_item_mark_can_clear() {
    let mut persistence = create_test_persistence();
    let created: Checklist = persistence
        .create_checklist(&create_test_checklist("kitchen", 3))
        .unwrap();

    persistence.set_item_mark(created.id, 3, true).unwrap();
    persistence.set_item_mark(created.id, 3, false).unwrap();

    assert_eq!(persistence.get_checklist(created.id).unwrap().marked_count(), 0);
}

#[test]
fn test_set_item_mark_unknown_order_fails() {
    let mut persistence = create_test_persistence();
    let created: Checklist = persistence
        .create_checklist(&create_test_checklist("kitchen", 3))
        .unwrap();

    assert!(matches!(
        persistence.set_item_mark(created.id, 7, true),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.set_item_mark(created.id + 1, 1, true),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_delete_unknown_item_fails_without_changes() {
    let mut persistence = create_test_persistence();
    let created: Checklist = persistence
        .create_checklist(&create_test_checklist("kitchen", 3))
        .unwrap();

    let result = persistence.delete_checklist_item(created.id, 5);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    assert_eq!(persistence.get_checklist(created.id).unwrap(), created);
}

#[test]
fn test_duplicate_item_orders_are_rejected() {
    let mut persistence = create_test_persistence();
    let checklist = NewChecklist {
        name: String::from("dup"),
        area: 1,
        items: vec![
            ChecklistItem::new("A", 1, "Floor"),
            ChecklistItem::new("A", 1, "Walls"),
        ],
    };

    let result = persistence.create_checklist(&checklist);

    assert_eq!(
        result,
        Err(PersistenceError::Domain(DomainError::DuplicateItemOrder {
            order: 1
        }))
    );
    assert!(persistence.list_checklists_by_area(1).unwrap().is_empty());
}

#[test]
fn test_explicit_orders_are_not_renumbered() {
    let mut persistence = create_test_persistence();
    let checklist = NewChecklist {
        name: String::from("sparse"),
        area: 1,
        items: vec![
            ChecklistItem::new("B", 10, "Doors"),
            ChecklistItem::new("A", 4, "Lamps"),
        ],
    };

    let created: Checklist = persistence.create_checklist(&checklist).unwrap();

    assert_eq!(created.items, checklist.items);
}

#[test]
fn test_delete_checklist_cascades_to_items() {
    let mut persistence = create_test_persistence();
    let created: Checklist = persistence
        .create_checklist(&create_test_checklist("kitchen", 3))
        .unwrap();
    assert_eq!(count_items(&mut persistence, created.id), 3);

    persistence.delete_checklist(created.id).unwrap();

    assert_eq!(count_items(&mut persistence, created.id), 0);
    assert!(matches!(
        persistence.get_checklist(created.id),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.delete_checklist(created.id),
        Err(PersistenceError::NotFound(_))
    ));
}
