// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod checklist_tests;
mod initialization_tests;

use time::{Date, Month, OffsetDateTime};

use cleaning_bot_domain::{
    ActiveInspection, FullName, InspectionStatus, NewChecklist, NewUser, Role, UserId,
};

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Returns 2025-03-15, the date used by most schedule fixtures.
pub fn create_test_date() -> Date {
    Date::from_calendar_date(2025, Month::March, 15).expect("Valid test date")
}

/// A planned entry for area 3 with the given checklist and inspector.
pub fn create_test_entry(checklist_id: &str, inspector_id: Option<&str>) -> ActiveInspection {
    ActiveInspection {
        date: create_test_date(),
        area: 3,
        cleaner_id: String::from("C1"),
        inspector_id: inspector_id.map(ToString::to_string),
        checklist_id: checklist_id.to_string(),
        status: InspectionStatus::Planned,
        created_at: OffsetDateTime::now_utc().replace_nanosecond(0).expect("Valid nanosecond"),
        updated_at: None,
    }
}

pub fn create_test_checklist(name: &str, area: i32) -> NewChecklist {
    NewChecklist::from_descriptions(
        name,
        area,
        &[
            String::from("Floor"),
            String::from("Windows"),
            String::from("Trash"),
        ],
    )
}

pub fn create_test_user(id: UserId, role: Role) -> NewUser {
    NewUser {
        id,
        full_name: FullName::new("Ivanov", "Ivan", "Ivanovich"),
        role,
        username: id.to_string(),
        team: String::from("Team A"),
        area: Some(3),
    }
}
