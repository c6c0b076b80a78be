// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use cleaning_bot_domain::Role;
use std::str::FromStr;

/// Prefix of the callback data that completes an inspection.
const COMPLETE_PREFIX: &str = "complete:";

/// An inbound chat event, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The `/start` command.
    Start,
    /// A free-text message.
    Text(String),
    /// An uploaded document whose content has already been fetched.
    Document {
        /// The original file name, used for format detection.
        file_name: String,
        /// The raw file content.
        content: Vec<u8>,
    },
    /// A button press.
    Action(Action),
}

/// A button press, identified by its callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the admin panel.
    AdminPanel,
    /// Open the user management menu.
    ManagePerson,
    /// Start registering a new user.
    AddPerson,
    /// Start deleting a user.
    DeletePerson,
    /// Start a checklist upload.
    AddChecklist,
    /// Open the schedule management menu.
    ScheduleWork,
    /// Start a schedule upload.
    AddSchedule,
    ConfirmYes,
    ConfirmNo,
    Cancel,
    /// List the inspections assigned to the sender.
    ViewSchedule,
    /// Show the sender's statistics.
    ViewStats,
    /// Mark the inspection with this checklist id as completed.
    Complete(String),
}

impl Action {
    /// Returns the callback data carried by the button for this action.
    #[must_use]
    pub fn callback_data(&self) -> String {
        match self {
            Self::AdminPanel => String::from("admin_panel"),
            Self::ManagePerson => String::from("manage_person"),
            Self::AddPerson => String::from("add_person"),
            Self::DeletePerson => String::from("del_person"),
            Self::AddChecklist => String::from("add_check_list"),
            Self::ScheduleWork => String::from("schedule_work"),
            Self::AddSchedule => String::from("add_schedule"),
            Self::ConfirmYes => String::from("confirm_yes"),
            Self::ConfirmNo => String::from("confirm_no"),
            Self::Cancel => String::from("cancel"),
            Self::ViewSchedule => String::from("view_schedule"),
            Self::ViewStats => String::from("view_stats"),
            Self::Complete(checklist_id) => format!("{COMPLETE_PREFIX}{checklist_id}"),
        }
    }

    /// Returns true if only administrators may trigger this action.
    #[must_use]
    pub const fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::AdminPanel
                | Self::ManagePerson
                | Self::AddPerson
                | Self::DeletePerson
                | Self::AddChecklist
                | Self::ScheduleWork
                | Self::AddSchedule
                | Self::ConfirmYes
                | Self::ConfirmNo
        )
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin_panel" => Ok(Self::AdminPanel),
            "manage_person" => Ok(Self::ManagePerson),
            "add_person" => Ok(Self::AddPerson),
            "del_person" => Ok(Self::DeletePerson),
            "add_check_list" => Ok(Self::AddChecklist),
            "schedule_work" => Ok(Self::ScheduleWork),
            "add_schedule" => Ok(Self::AddSchedule),
            "confirm_yes" => Ok(Self::ConfirmYes),
            "confirm_no" => Ok(Self::ConfirmNo),
            "cancel" => Ok(Self::Cancel),
            "view_schedule" => Ok(Self::ViewSchedule),
            "view_stats" => Ok(Self::ViewStats),
            _ => match s.strip_prefix(COMPLETE_PREFIX) {
                Some(checklist_id) if !checklist_id.trim().is_empty() => {
                    Ok(Self::Complete(checklist_id.to_string()))
                }
                _ => Err(CoreError::UnknownAction(s.to_string())),
            },
        }
    }
}

/// The role buttons offered while registering a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChoice {
    HeadOfDepartment,
    Inspector,
    Cleaner,
}

impl RoleChoice {
    /// All choices in the order they are offered.
    pub const ALL: [Self; 3] = [Self::HeadOfDepartment, Self::Inspector, Self::Cleaner];

    /// Button label shown on the reply keyboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HeadOfDepartment => "Head of department",
            Self::Inspector => "Inspector",
            Self::Cleaner => "Cleaner",
        }
    }

    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Self::HeadOfDepartment => Role::Admin,
            Self::Inspector => Role::Checker,
            Self::Cleaner => Role::User,
        }
    }

    /// Matches a button label exactly, after trimming.
    #[must_use]
    pub fn from_label(text: &str) -> Option<Self> {
        let text: &str = text.trim();
        Self::ALL.into_iter().find(|choice| choice.label() == text)
    }
}
