// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ChecklistItem, DomainError, FullName, NewUser, Role, parse_date, validate_item_orders,
    validate_new_user,
};
use time::{Date, Month};

fn create_test_new_user() -> NewUser {
    NewUser {
        id: 1001,
        full_name: FullName::new("Ivanov", "Ivan", "Ivanovich"),
        role: Role::User,
        username: String::from("ivanov"),
        team: String::from("Day"),
        area: None,
    }
}

#[test]
fn test_parse_date_accepts_iso_date() {
    let date: Date = parse_date("2024-03-15").unwrap();
    assert_eq!(date, Date::from_calendar_date(2024, Month::March, 15).unwrap());
}

#[test]
fn test_parse_date_trims_whitespace() {
    assert!(parse_date(" 2024-03-15 ").is_ok());
}

#[test]
fn test_parse_date_rejects_other_formats() {
    let result: Result<Date, DomainError> = parse_date("15.03.2024");
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}

#[test]
fn test_parse_date_rejects_impossible_day() {
    assert!(parse_date("2024-02-30").is_err());
}

#[test]
fn test_validate_item_orders_accepts_unique_orders() {
    let items: Vec<ChecklistItem> = vec![
        ChecklistItem::new("A", 1, "Floor"),
        ChecklistItem::new("B", 3, "Windows"),
        ChecklistItem::new("A", 2, "Bins"),
    ];
    assert!(validate_item_orders(&items).is_ok());
}

#[test]
fn test_validate_item_orders_rejects_duplicate() {
    let items: Vec<ChecklistItem> = vec![
        ChecklistItem::new("A", 1, "Floor"),
        ChecklistItem::new("A", 1, "Windows"),
    ];
    assert_eq!(
        validate_item_orders(&items),
        Err(DomainError::DuplicateItemOrder { order: 1 })
    );
}

#[test]
fn test_validate_new_user_accepts_complete_user() {
    assert!(validate_new_user(&create_test_new_user()).is_ok());
}

#[test]
fn test_validate_new_user_rejects_blank_username() {
    let mut user: NewUser = create_test_new_user();
    user.username = String::from("  ");
    assert_eq!(
        validate_new_user(&user),
        Err(DomainError::MissingField("username"))
    );
}

#[test]
fn test_validate_new_user_rejects_blank_team() {
    let mut user: NewUser = create_test_new_user();
    user.team = String::new();
    assert_eq!(
        validate_new_user(&user),
        Err(DomainError::MissingField("team"))
    );
}
