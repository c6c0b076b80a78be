// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Menus and prompt keyboards.
//!
//! Button callback data always comes from `Action::callback_data`, so the
//! parser in the core crate and the buttons rendered here cannot drift.

use cleaning_bot::{Action, Menu, Prompt, RoleChoice};
use cleaning_bot_domain::{ActiveInspection, InspectionStatus, Role, User};

use crate::request_response::{Button, Keyboard, OutboundMessage};

fn button(text: &str, action: &Action) -> Button {
    Button::new(text, &action.callback_data())
}

fn inline(rows: Vec<Vec<Button>>) -> Keyboard {
    Keyboard::Inline { rows }
}

fn cancel_keyboard() -> Keyboard {
    inline(vec![vec![button("❌ Cancel", &Action::Cancel)]])
}

/// Renders a menu for a user.
///
/// `Menu::Main` depends on the user's role. The other menus are admin
/// menus and look the same for everyone allowed to open them.
#[must_use]
pub fn render_menu(menu: Menu, user: &User) -> OutboundMessage {
    match menu {
        Menu::Main => main_menu(user),
        Menu::AdminPanel => OutboundMessage::with_keyboard(
            "🛠 Admin panel",
            inline(vec![
                vec![button("👥 Manage people", &Action::ManagePerson)],
                vec![button("📅 Work schedule", &Action::ScheduleWork)],
                vec![button("📋 Upload checklist", &Action::AddChecklist)],
            ]),
        ),
        Menu::ManagePerson => OutboundMessage::with_keyboard(
            "👥 Manage people",
            inline(vec![
                vec![button("➕ Add person", &Action::AddPerson)],
                vec![button("➖ Delete person", &Action::DeletePerson)],
                vec![button("⬅️ Back", &Action::AdminPanel)],
            ]),
        ),
        Menu::ScheduleWork => OutboundMessage::with_keyboard(
            "📅 Work schedule",
            inline(vec![
                vec![button("📤 Upload schedule", &Action::AddSchedule)],
                vec![button("📅 View schedule", &Action::ViewSchedule)],
                vec![button("⬅️ Back", &Action::AdminPanel)],
            ]),
        ),
    }
}

fn main_menu(user: &User) -> OutboundMessage {
    let greeting: String = format!(
        "👋 Hello, {}!\nYou are signed in as {}.",
        user.full_name.name(),
        user.role.display_name()
    );

    let rows: Vec<Vec<Button>> = match user.role {
        Role::Admin => vec![vec![button("🛠 Admin panel", &Action::AdminPanel)]],
        Role::Checker => vec![vec![button("📅 My inspections", &Action::ViewSchedule)]],
        Role::User => vec![vec![button("📊 My statistics", &Action::ViewStats)]],
    };

    OutboundMessage::with_keyboard(greeting, inline(rows))
}

/// Renders a state machine prompt with the keyboard it needs.
#[must_use]
pub fn render_prompt(prompt: &Prompt) -> OutboundMessage {
    let text: String = prompt.text();
    match prompt {
        Prompt::UseMenu | Prompt::NothingToConfirm | Prompt::Cancelled => {
            OutboundMessage::text(text)
        }
        Prompt::AskRole | Prompt::InvalidRole => OutboundMessage::with_keyboard(
            text,
            Keyboard::Reply {
                rows: RoleChoice::ALL
                    .iter()
                    .map(|choice| vec![choice.label().to_string()])
                    .collect(),
                one_time: true,
            },
        ),
        Prompt::ConfirmDelete { .. } => OutboundMessage::with_keyboard(
            text,
            inline(vec![vec![
                button("✅ Yes", &Action::ConfirmYes),
                button("❌ No", &Action::ConfirmNo),
            ]]),
        ),
        _ => OutboundMessage::with_keyboard(text, cancel_keyboard()),
    }
}

/// Renders one active inspection. Planned entries get a complete button
/// when `completable` is set.
#[must_use]
pub fn render_active_inspection(entry: &ActiveInspection, completable: bool) -> OutboundMessage {
    let text: String = format!(
        "📋 Checklist {}\n📅 {}\n📍 Area {}\n🧹 Cleaner {}\n🔍 Inspector {}\nStatus: {}",
        entry.checklist_id,
        entry.date,
        entry.area,
        entry.cleaner_id,
        entry.inspector_id.as_deref().unwrap_or("unassigned"),
        entry.status
    );

    if completable && entry.status == InspectionStatus::Planned {
        OutboundMessage::with_keyboard(
            text,
            inline(vec![vec![button(
                "✅ Complete",
                &Action::Complete(entry.checklist_id.clone()),
            )]]),
        )
    } else {
        OutboundMessage::text(text)
    }
}
