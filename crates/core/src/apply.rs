// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Action, Event, RoleChoice};
use crate::format::TabularFormat;
use crate::state::{Conversation, Effect, Menu, Prompt, Transition};
use cleaning_bot_domain::{AreaCode, FullName, UserId};

/// Applies an event to a conversation, producing the next state and the
/// effects to execute.
///
/// This function is pure. It performs no I/O and never fails: input that
/// does not fit the current state produces a re-prompt and leaves the state
/// unchanged. Role checks happen before this function is called.
///
/// # Arguments
///
/// * `state` - The sender's current conversation state
/// * `event` - The inbound event
#[must_use]
pub fn apply(state: &Conversation, event: Event) -> Transition {
    match event {
        Event::Start => Transition::to(Conversation::Idle, vec![Effect::ShowMenu(Menu::Main)]),
        Event::Action(action) => apply_action(state, action),
        Event::Text(text) => apply_text(state, &text),
        Event::Document { file_name, content } => apply_document(state, file_name, content),
    }
}

fn apply_action(state: &Conversation, action: Action) -> Transition {
    match action {
        Action::Cancel => Transition::to(
            Conversation::Idle,
            vec![
                Effect::Reply(Prompt::Cancelled),
                Effect::ShowMenu(Menu::Main),
            ],
        ),
        Action::AddChecklist => Transition::to(
            Conversation::AwaitingChecklistArea,
            vec![Effect::Reply(Prompt::AskChecklistArea)],
        ),
        Action::AddSchedule => Transition::to(
            Conversation::AwaitingScheduleFile,
            vec![Effect::Reply(Prompt::AskScheduleFile)],
        ),
        Action::AddPerson => Transition::to(
            Conversation::AwaitingNewUserId,
            vec![Effect::Reply(Prompt::AskNewUserId)],
        ),
        Action::DeletePerson => Transition::to(
            Conversation::AwaitingDeleteId,
            vec![Effect::Reply(Prompt::AskDeleteId)],
        ),
        Action::AdminPanel => stay_with(state, Effect::ShowMenu(Menu::AdminPanel)),
        Action::ManagePerson => stay_with(state, Effect::ShowMenu(Menu::ManagePerson)),
        Action::ScheduleWork => stay_with(state, Effect::ShowMenu(Menu::ScheduleWork)),
        Action::ViewSchedule => stay_with(state, Effect::ShowSchedule),
        Action::ViewStats => stay_with(state, Effect::ShowStatistics),
        Action::Complete(checklist_id) => {
            stay_with(state, Effect::CompleteInspection { checklist_id })
        }
        Action::ConfirmYes => match state {
            Conversation::AwaitingDeleteConfirmation { user_id } => Transition::to(
                Conversation::Idle,
                vec![
                    Effect::DeleteUser { user_id: *user_id },
                    Effect::ShowMenu(Menu::Main),
                ],
            ),
            _ => Transition::stay(state, Prompt::NothingToConfirm),
        },
        Action::ConfirmNo => match state {
            Conversation::AwaitingDeleteConfirmation { .. } => Transition::to(
                Conversation::AwaitingDeleteId,
                vec![Effect::Reply(Prompt::AskDeleteIdAgain)],
            ),
            _ => Transition::stay(state, Prompt::NothingToConfirm),
        },
    }
}

fn apply_text(state: &Conversation, text: &str) -> Transition {
    match state {
        Conversation::Idle => Transition::stay(state, Prompt::UseMenu),
        Conversation::AwaitingChecklistArea => match text.trim().parse::<AreaCode>() {
            Ok(area) => Transition::to(
                Conversation::AwaitingChecklistFile { area },
                vec![Effect::Reply(Prompt::AskChecklistFile)],
            ),
            Err(_) => Transition::stay(state, Prompt::InvalidArea),
        },
        Conversation::AwaitingChecklistFile { .. } | Conversation::AwaitingScheduleFile => {
            Transition::stay(state, Prompt::NotAFile)
        }
        Conversation::AwaitingNewUserId => match parse_user_id(text) {
            Some(user_id) => Transition::to(
                Conversation::AwaitingNewUserName { user_id },
                vec![Effect::Reply(Prompt::AskFullName)],
            ),
            None => Transition::stay(state, Prompt::InvalidUserId),
        },
        Conversation::AwaitingNewUserName { user_id } => match FullName::parse(text) {
            Ok(full_name) => Transition::to(
                Conversation::AwaitingNewUserRole {
                    user_id: *user_id,
                    full_name,
                },
                vec![Effect::Reply(Prompt::AskRole)],
            ),
            Err(_) => Transition::stay(state, Prompt::InvalidFullName),
        },
        Conversation::AwaitingNewUserRole { user_id, full_name } => {
            match RoleChoice::from_label(text) {
                Some(choice) => Transition::to(
                    Conversation::Idle,
                    vec![
                        Effect::RegisterUser {
                            user_id: *user_id,
                            full_name: full_name.clone(),
                            role: choice.role(),
                        },
                        Effect::ShowMenu(Menu::Main),
                    ],
                ),
                None => Transition::stay(state, Prompt::InvalidRole),
            }
        }
        Conversation::AwaitingDeleteId => match parse_user_id(text) {
            Some(user_id) => Transition::to(
                Conversation::AwaitingDeleteConfirmation { user_id },
                vec![Effect::Reply(Prompt::ConfirmDelete { user_id })],
            ),
            None => Transition::stay(state, Prompt::InvalidUserId),
        },
        Conversation::AwaitingDeleteConfirmation { .. } => {
            Transition::stay(state, state.current_prompt())
        }
    }
}

fn apply_document(state: &Conversation, file_name: String, content: Vec<u8>) -> Transition {
    if !state.awaits_file() {
        return Transition::stay(state, state.current_prompt());
    }

    let Some(format) = TabularFormat::from_file_name(&file_name) else {
        return Transition::stay(state, Prompt::UnsupportedFileType);
    };

    let ingest: Effect = match state {
        Conversation::AwaitingChecklistFile { area } => Effect::IngestChecklist {
            area: *area,
            file_name,
            format,
            content,
        },
        _ => Effect::IngestSchedule {
            file_name,
            format,
            content,
        },
    };

    Transition::to(
        Conversation::Idle,
        vec![ingest, Effect::ShowMenu(Menu::Main)],
    )
}

fn stay_with(state: &Conversation, effect: Effect) -> Transition {
    Transition::to(state.clone(), vec![effect])
}

fn parse_user_id(text: &str) -> Option<UserId> {
    text.trim().parse::<UserId>().ok()
}
