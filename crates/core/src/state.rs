// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::format::TabularFormat;
use cleaning_bot_domain::{AreaCode, FullName, Role, UserId};

/// Per-user conversation state.
///
/// Every multi-step admin flow is an explicit variant. Data collected in
/// earlier steps travels inside the variant rather than in a side table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Conversation {
    /// No flow in progress.
    #[default]
    Idle,
    /// Checklist upload, waiting for the area code.
    AwaitingChecklistArea,
    /// Checklist upload, waiting for the file.
    AwaitingChecklistFile {
        /// The area the checklist will belong to.
        area: AreaCode,
    },
    /// Schedule upload, waiting for the file.
    AwaitingScheduleFile,
    /// User registration, waiting for the chat user id.
    AwaitingNewUserId,
    /// User registration, waiting for the full name.
    AwaitingNewUserName { user_id: UserId },
    /// User registration, waiting for the role button.
    AwaitingNewUserRole { user_id: UserId, full_name: FullName },
    /// User deletion, waiting for the chat user id.
    AwaitingDeleteId,
    /// User deletion, waiting for yes or no.
    AwaitingDeleteConfirmation { user_id: UserId },
}

impl Conversation {
    /// The prompt that asks for the input this state is waiting for.
    #[must_use]
    pub const fn current_prompt(&self) -> Prompt {
        match self {
            Self::Idle => Prompt::UseMenu,
            Self::AwaitingChecklistArea => Prompt::AskChecklistArea,
            Self::AwaitingChecklistFile { .. } => Prompt::AskChecklistFile,
            Self::AwaitingScheduleFile => Prompt::AskScheduleFile,
            Self::AwaitingNewUserId => Prompt::AskNewUserId,
            Self::AwaitingNewUserName { .. } => Prompt::AskFullName,
            Self::AwaitingNewUserRole { .. } => Prompt::AskRole,
            Self::AwaitingDeleteId => Prompt::AskDeleteId,
            Self::AwaitingDeleteConfirmation { user_id } => {
                Prompt::ConfirmDelete { user_id: *user_id }
            }
        }
    }

    /// Returns true if this state expects a document upload.
    #[must_use]
    pub const fn awaits_file(&self) -> bool {
        matches!(
            self,
            Self::AwaitingChecklistFile { .. } | Self::AwaitingScheduleFile
        )
    }
}

/// Menus the chat layer knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    /// The menu matching the sender's role.
    Main,
    AdminPanel,
    ManagePerson,
    ScheduleWork,
}

/// Fixed replies produced by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    UseMenu,
    AskChecklistArea,
    InvalidArea,
    AskChecklistFile,
    AskScheduleFile,
    /// A text message arrived while a file was expected.
    NotAFile,
    /// A file arrived with an extension that is not accepted.
    UnsupportedFileType,
    AskNewUserId,
    InvalidUserId,
    AskFullName,
    InvalidFullName,
    AskRole,
    InvalidRole,
    AskDeleteId,
    ConfirmDelete { user_id: UserId },
    AskDeleteIdAgain,
    /// A confirmation button was pressed with nothing to confirm.
    NothingToConfirm,
    Cancelled,
}

impl Prompt {
    /// Renders the user-visible text.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::UseMenu => String::from("Please choose an action from the menu."),
            Self::AskChecklistArea => String::from(
                "📋 Checklist upload\n\nEnter the area number the checklist belongs to:",
            ),
            Self::InvalidArea => String::from("❌ Please enter a numeric area:"),
            Self::AskChecklistFile => format!(
                "📋 Checklist upload\n\nPlease send the checklist as a {} file.",
                accepted_formats()
            ),
            Self::AskScheduleFile => format!(
                "📅 Schedule upload\n\nPlease send the schedule as a {} file.\n\
                 Columns: cleaner id, inspector id, checklist id, area, date (YYYY-MM-DD).",
                accepted_formats()
            ),
            Self::NotAFile => format!(
                "❌ This is not a file!\n\n\
                 Please send a document in {} format, not a photo or text.",
                accepted_formats()
            ),
            Self::UnsupportedFileType => format!(
                "❌ Wrong file format!\n\nPlease send a file in {} format.",
                accepted_formats()
            ),
            Self::AskNewUserId => {
                String::from("Let's add a new user!\n\nEnter the user's ID:")
            }
            Self::InvalidUserId => String::from("❌ Please enter a valid numeric ID:"),
            Self::AskFullName => {
                String::from("Great! Now enter the user's full name (surname, name, patronymic):")
            }
            Self::InvalidFullName => String::from(
                "❌ The full name must contain exactly three words: surname, name and patronymic.",
            ),
            Self::AskRole => String::from("Now choose the user's role:"),
            Self::InvalidRole => {
                String::from("Please choose a role from the offered options:")
            }
            Self::AskDeleteId => String::from("🔢 Enter the user's ID:"),
            Self::ConfirmDelete { user_id } => {
                format!("Are you sure you want to delete user {user_id}?")
            }
            Self::AskDeleteIdAgain => String::from("🔄 Enter the user's ID again:"),
            Self::NothingToConfirm => String::from("There is nothing to confirm."),
            Self::Cancelled => String::from("❌ Operation cancelled."),
        }
    }
}

fn accepted_formats() -> String {
    let names: Vec<String> = TabularFormat::ALL
        .iter()
        .map(|format| format!(".{}", format.extension()))
        .collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
        _ => names.concat(),
    }
}

/// Work the chat layer must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a fixed reply.
    Reply(Prompt),
    /// Send a menu.
    ShowMenu(Menu),
    /// Parse the file and store it as a checklist.
    IngestChecklist {
        area: AreaCode,
        file_name: String,
        format: TabularFormat,
        content: Vec<u8>,
    },
    /// Parse the file and append its rows to the schedule.
    IngestSchedule {
        file_name: String,
        format: TabularFormat,
        content: Vec<u8>,
    },
    RegisterUser {
        user_id: UserId,
        full_name: FullName,
        role: Role,
    },
    DeleteUser { user_id: UserId },
    /// List the sender's assigned inspections.
    ShowSchedule,
    /// Report the sender's statistics.
    ShowStatistics,
    /// Mark an inspection completed and free its inspector.
    CompleteInspection { checklist_id: String },
}

/// The outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The state after the event.
    pub state: Conversation,
    /// Effects to execute, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    /// Moves to `state` with the given effects.
    #[must_use]
    pub const fn to(state: Conversation, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    /// Keeps `state` and sends a single reply.
    #[must_use]
    pub fn stay(state: &Conversation, prompt: Prompt) -> Self {
        Self {
            state: state.clone(),
            effects: vec![Effect::Reply(prompt)],
        }
    }
}
