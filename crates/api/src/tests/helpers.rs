// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use time::OffsetDateTime;
use time::macros::datetime;

use cleaning_bot::Conversation;
use cleaning_bot_domain::{FullName, NewUser, Role, User, UserId};
use cleaning_bot_persistence::Persistence;

use crate::{ChatUpdate, InboundEvent, UpdateOutcome, handle_update};

pub const ADMIN_ID: UserId = 1;
pub const CHECKER_ID: UserId = 2;
pub const CLEANER_ID: UserId = 3;
pub const OTHER_CHECKER_ID: UserId = 4;
pub const UNKNOWN_ID: UserId = 999;

pub fn test_now() -> OffsetDateTime {
    datetime!(2025-03-15 09:00 UTC)
}

fn new_user(id: UserId, role: Role) -> NewUser {
    NewUser {
        id,
        full_name: FullName::new("Ivanov", "Ivan", "Ivanovich"),
        role,
        username: id.to_string(),
        team: String::from("Team A"),
        area: Some(3),
    }
}

/// In-memory persistence with an admin, two inspectors and a cleaner.
pub fn setup_test_persistence() -> Persistence {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    for (id, role) in [
        (ADMIN_ID, Role::Admin),
        (CHECKER_ID, Role::Checker),
        (CLEANER_ID, Role::User),
        (OTHER_CHECKER_ID, Role::Checker),
    ] {
        persistence
            .create_user(&new_user(id, role))
            .expect("Failed to create test user");
    }
    persistence
}

pub fn get_user(persistence: &mut Persistence, id: UserId) -> User {
    persistence.get_user(id).expect("Test user not found")
}

pub fn text(from: UserId, text: &str) -> ChatUpdate {
    ChatUpdate {
        from_user_id: from,
        event: InboundEvent::Text {
            text: text.to_string(),
        },
    }
}

pub fn callback(from: UserId, data: &str) -> ChatUpdate {
    ChatUpdate {
        from_user_id: from,
        event: InboundEvent::Callback {
            data: data.to_string(),
        },
    }
}

pub fn document(from: UserId, file_name: &str, content: impl AsRef<[u8]>) -> ChatUpdate {
    ChatUpdate {
        from_user_id: from,
        event: InboundEvent::Document {
            file_name: file_name.to_string(),
            content: content.as_ref().to_vec(),
        },
    }
}

/// An xlsx workbook whose first sheet is filled by `fill`.
pub fn xlsx_workbook(fill: impl FnOnce(&mut Worksheet) -> Result<(), XlsxError>) -> Vec<u8> {
    let mut workbook: Workbook = Workbook::new();
    fill(workbook.add_worksheet()).expect("Worksheet should fill");
    workbook.save_to_buffer().expect("Workbook should save")
}

/// Feeds updates one after another, threading the conversation state.
pub fn run_updates(
    persistence: &mut Persistence,
    updates: Vec<ChatUpdate>,
) -> (Conversation, Vec<UpdateOutcome>) {
    let mut state: Conversation = Conversation::Idle;
    let mut outcomes: Vec<UpdateOutcome> = Vec::new();
    for update in updates {
        let outcome: UpdateOutcome = handle_update(persistence, &state, update, test_now());
        state = outcome.state.clone();
        outcomes.push(outcome);
    }
    (state, outcomes)
}

/// Schedule rows: two entries inspected by `CHECKER_ID` for `CLEANER_ID`
/// and one inspected by `OTHER_CHECKER_ID`.
pub fn schedule_csv() -> String {
    format!(
        "{CLEANER_ID},{CHECKER_ID},CL-1,3,2025-03-20\n\
         {CLEANER_ID},{CHECKER_ID},CL-2,3,2025-03-21\n\
         77,{OTHER_CHECKER_ID},CL-3,4,2025-03-22\n"
    )
}
