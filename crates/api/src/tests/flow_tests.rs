// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-step admin flows driven through `handle_update`.

use cleaning_bot::Conversation;
use cleaning_bot_domain::{FullName, Role};

use crate::{ApiError, Keyboard, delete_user, register_user};

use super::helpers::{
    ADMIN_ID, CHECKER_ID, callback, document, get_user, run_updates, schedule_csv,
    setup_test_persistence, text, xlsx_workbook,
};

#[test]
fn test_add_person_flow_registers_user() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_person"),
            text(ADMIN_ID, "100"),
            text(ADMIN_ID, "Petrov Petr Petrovich"),
            text(ADMIN_ID, "Inspector"),
        ],
    );

    assert_eq!(state, Conversation::Idle);
    let Some(Keyboard::Reply { rows, .. }) = &outcomes[2].messages[0].keyboard else {
        panic!("Expected the role keyboard");
    };
    assert_eq!(rows.len(), 3);

    let user = persistence.get_user(100).expect("User should be registered");
    assert_eq!(user.role, Role::Checker);
    assert_eq!(user.full_name, FullName::new("Petrov", "Petr", "Petrovich"));
    assert_eq!(user.username, "100");
    assert_eq!(user.team, "Team A");
    assert_eq!(user.area, Some(3));
}

#[test]
fn test_add_person_flow_reprompts_on_bad_input() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_person"),
            text(ADMIN_ID, "abc"),
            text(ADMIN_ID, "100"),
            text(ADMIN_ID, "Petrov Petr"),
            text(ADMIN_ID, "Petrov Petr Petrovich"),
            text(ADMIN_ID, "Janitor"),
        ],
    );

    assert!(matches!(state, Conversation::AwaitingNewUserRole { user_id: 100, .. }));
    assert!(outcomes[1].messages[0].text.contains("numeric ID"));
    assert!(outcomes[3].messages[0].text.contains("three words"));
    assert!(!persistence.user_exists(100).expect("Lookup should succeed"));
}

#[test]
fn test_add_person_flow_duplicate_id_reports_error() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_person"),
            text(ADMIN_ID, &CHECKER_ID.to_string()),
            text(ADMIN_ID, "Petrov Petr Petrovich"),
            text(ADMIN_ID, "Cleaner"),
        ],
    );

    assert_eq!(state, Conversation::Idle);
    assert!(outcomes[3].messages[0].text.contains("already registered"));
    assert_eq!(
        get_user(&mut persistence, CHECKER_ID).role,
        Role::Checker
    );
}

#[test]
fn test_delete_person_flow_with_confirmation() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "del_person"),
            text(ADMIN_ID, &CHECKER_ID.to_string()),
            callback(ADMIN_ID, "confirm_yes"),
        ],
    );

    assert_eq!(state, Conversation::Idle);
    let Some(Keyboard::Inline { rows }) = &outcomes[1].messages[0].keyboard else {
        panic!("Expected the confirmation keyboard");
    };
    assert_eq!(rows[0][0].callback_data, "confirm_yes");
    assert_eq!(rows[0][1].callback_data, "confirm_no");
    assert!(!persistence.user_exists(CHECKER_ID).expect("Lookup should succeed"));
}

#[test]
fn test_delete_person_flow_no_asks_again() {
    let mut persistence = setup_test_persistence();

    let (state, _) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "del_person"),
            text(ADMIN_ID, &CHECKER_ID.to_string()),
            callback(ADMIN_ID, "confirm_no"),
        ],
    );

    assert_eq!(state, Conversation::AwaitingDeleteId);
    assert!(persistence.user_exists(CHECKER_ID).expect("Lookup should succeed"));
}

#[test]
fn test_delete_unknown_person_reports_not_found() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "del_person"),
            text(ADMIN_ID, "555"),
            callback(ADMIN_ID, "confirm_yes"),
        ],
    );

    assert_eq!(state, Conversation::Idle);
    assert!(outcomes[2].messages[0].text.contains("not found"));
}

#[test]
fn test_admin_cannot_delete_themselves() {
    let mut persistence = setup_test_persistence();
    let admin = get_user(&mut persistence, ADMIN_ID);

    let result = delete_user(&mut persistence, &admin, ADMIN_ID);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert!(persistence.user_exists(ADMIN_ID).expect("Lookup should succeed"));
}

#[test]
fn test_register_user_inherits_admin_team() {
    let mut persistence = setup_test_persistence();
    let admin = get_user(&mut persistence, ADMIN_ID);

    let created = register_user(
        &mut persistence,
        &admin,
        200,
        FullName::new("Sidorov", "Sidor", "Sidorovich"),
        Role::User,
    )
    .expect("Registration should succeed");

    assert_eq!(created.team, admin.team);
    assert_eq!(created.area, admin.area);
    assert_eq!(created.role, Role::User);
}

#[test]
fn test_checklist_upload_flow_stores_checklist() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_check_list"),
            text(ADMIN_ID, "x"),
            text(ADMIN_ID, "3"),
            document(ADMIN_ID, "Form A.csv", "Floor\nWindows\n\n  Trash  \n"),
        ],
    );

    assert_eq!(state, Conversation::Idle);
    assert!(outcomes[1].messages[0].text.contains("numeric area"));
    assert!(outcomes[3].messages[0].text.contains("Form A"));

    let checklist = persistence
        .get_checklist_by_name("Form A")
        .expect("Checklist should be stored");
    assert_eq!(checklist.area, 3);
    let descriptions: Vec<&str> = checklist
        .items
        .iter()
        .map(|item| item.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["Floor", "Windows", "Trash"]);
    let orders: Vec<i32> = checklist.items.iter().map(|item| item.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert!(checklist.items.iter().all(|item| !item.mark));
}

#[test]
fn test_checklist_upload_rejects_wrong_file_type() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_check_list"),
            text(ADMIN_ID, "3"),
            document(ADMIN_ID, "photo.jpg", "not a table"),
        ],
    );

    assert_eq!(state, Conversation::AwaitingChecklistFile { area: 3 });
    assert!(outcomes[2].messages[0].text.contains("Wrong file format"));
}

#[test]
fn test_checklist_upload_text_instead_of_file() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_check_list"),
            text(ADMIN_ID, "3"),
            text(ADMIN_ID, "Floor"),
        ],
    );

    assert_eq!(state, Conversation::AwaitingChecklistFile { area: 3 });
    assert!(outcomes[2].messages[0].text.contains("not a file"));
}

#[test]
fn test_empty_checklist_upload_stores_nothing() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_check_list"),
            text(ADMIN_ID, "3"),
            document(ADMIN_ID, "Empty.csv", "\n  \n"),
        ],
    );

    assert_eq!(state, Conversation::Idle);
    assert!(outcomes[2].messages[0].text.contains("Nothing was saved"));
    assert!(
        persistence
            .list_checklists_by_area(3)
            .expect("Listing should succeed")
            .is_empty()
    );
}

#[test]
fn test_schedule_upload_flow_appends_entries() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_schedule"),
            document(ADMIN_ID, "march.csv", &schedule_csv()),
        ],
    );

    assert_eq!(state, Conversation::Idle);
    assert!(outcomes[1].messages[0].text.contains("3 inspections added"));

    let schedule = persistence.get_schedule().expect("Schedule should load");
    assert_eq!(schedule.active_inspectors.len(), 3);
    assert!(schedule.free_inspectors.is_empty());
}

#[test]
fn test_schedule_upload_with_bad_row_stores_nothing() {
    let mut persistence = setup_test_persistence();
    let content = format!("{}3,2,CL-9,3,20-03-2025\n", schedule_csv());

    let (_, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_schedule"),
            document(ADMIN_ID, "march.csv", &content),
        ],
    );

    assert!(outcomes[1].messages[0].text.contains("row 4"));
    let schedule = persistence.get_schedule().expect("Schedule should load");
    assert!(schedule.active_inspectors.is_empty());
}

#[test]
fn test_schedule_upload_with_taken_checklist_id_stores_nothing() {
    let mut persistence = setup_test_persistence();

    run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_schedule"),
            document(ADMIN_ID, "march.csv", "3,2,CL-1,3,2025-03-20\n"),
        ],
    );
    let (_, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_schedule"),
            document(ADMIN_ID, "april.csv", &schedule_csv()),
        ],
    );

    assert!(outcomes[1].messages[0].text.contains("already scheduled"));
    let schedule = persistence.get_schedule().expect("Schedule should load");
    assert_eq!(schedule.active_inspectors.len(), 1);
}

#[test]
fn test_schedule_upload_accepts_tsv() {
    let mut persistence = setup_test_persistence();

    run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_schedule"),
            document(ADMIN_ID, "march.tsv", "3\t2\tCL-1\t3\t2025-03-20\n"),
        ],
    );

    let entry = persistence
        .find_active_inspection("CL-1")
        .expect("Entry should be stored");
    assert_eq!(entry.inspector_id.as_deref(), Some("2"));
    assert_eq!(entry.area, 3);
}

#[test]
fn test_cancel_leaves_flow() {
    let mut persistence = setup_test_persistence();

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![callback(ADMIN_ID, "add_schedule"), callback(ADMIN_ID, "cancel")],
    );

    assert_eq!(state, Conversation::Idle);
    assert!(outcomes[1].messages[0].text.contains("cancelled"));
}

#[test]
fn test_schedule_upload_accepts_xlsx() {
    let mut persistence = setup_test_persistence();
    let content = xlsx_workbook(|sheet| {
        for (col, cell) in ["3", "2", "CL-1", "3", "2025-03-20"].into_iter().enumerate() {
            sheet.write_string(0, u16::try_from(col).expect("Column fits"), cell)?;
        }
        Ok(())
    });

    let (state, outcomes) = run_updates(
        &mut persistence,
        vec![
            callback(ADMIN_ID, "add_schedule"),
            document(ADMIN_ID, "march.xlsx", content),
        ],
    );

    assert_eq!(state, Conversation::Idle);
    assert!(outcomes[1].messages[0].text.contains("1 inspections added"));
    let entry = persistence
        .find_active_inspection("CL-1")
        .expect("Entry should be stored");
    assert_eq!(entry.cleaner_id, "3");
}
