// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chat update handling.
//!
//! `handle_update` is the single entry point. It resolves the sender, feeds
//! the event to the conversation state machine and executes the resulting
//! effects against the stores. The other public functions execute one
//! effect each and can be called directly.

use std::str::FromStr;
use time::OffsetDateTime;
use tracing::{error, info, warn};

use cleaning_bot::{Action, Conversation, Effect, Event, TabularFormat, Transition, apply};
use cleaning_bot_domain::{
    ActiveFilter, ActiveInspection, AreaCode, Checklist, FullName, Inspection, InspectionStatus,
    NewChecklist, NewUser, Role, Schedule, User, UserId,
};
use cleaning_bot_persistence::Persistence;

use crate::auth::{AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::intake::{checklist_from_upload, schedule_from_upload};
use crate::menus::{render_active_inspection, render_menu, render_prompt};
use crate::request_response::{ChatUpdate, InboundEvent, OutboundMessage};

/// The text command that opens the role menu.
pub const START_COMMAND: &str = "/start";

/// Result of handling one chat update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The sender's conversation state after the update.
    pub state: Conversation,
    /// Messages to send back, in order.
    pub messages: Vec<OutboundMessage>,
}

impl UpdateOutcome {
    fn rejected(state: &Conversation, err: &ApiError) -> Self {
        Self {
            state: state.clone(),
            messages: vec![OutboundMessage::text(err.to_reply())],
        }
    }
}

/// Counts reported to a cleaner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Active inspections of the cleaner still planned.
    pub planned: usize,
    /// Active inspections of the cleaner already completed.
    pub completed: usize,
    /// Recorded inspections of the cleaner.
    pub inspections: usize,
    /// Problems across the recorded inspections.
    pub problems: usize,
}

/// Handles one chat update.
///
/// This function:
/// - Rejects senders that are not registered
/// - Translates the transport event into a state machine event
/// - Refuses admin actions to other roles
/// - Applies the event to the sender's conversation
/// - Executes every resulting effect, turning failures into replies
///
/// It never fails. A rejected update leaves the conversation unchanged.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `state` - The sender's current conversation state
/// * `update` - The inbound update
/// * `now` - The time used for created and updated stamps
pub fn handle_update(
    persistence: &mut Persistence,
    state: &Conversation,
    update: ChatUpdate,
    now: OffsetDateTime,
) -> UpdateOutcome {
    let user: User = match AuthenticationService::resolve_sender(persistence, update.from_user_id)
    {
        Ok(user) => user,
        Err(err) => return UpdateOutcome::rejected(state, &err),
    };

    let event: Event = match translate_event(update.event) {
        Ok(event) => event,
        Err(err) => {
            warn!(user_id = user.id, error = %err, "Rejected chat event");
            return UpdateOutcome::rejected(state, &err);
        }
    };

    if let Event::Action(action) = &event
        && let Err(err) = AuthorizationService::authorize_action(&user, action)
    {
        return UpdateOutcome::rejected(state, &err.into());
    }

    let transition: Transition = apply(state, event);
    if transition.state != *state {
        info!(
            user_id = user.id,
            from = ?state,
            to = ?transition.state,
            "Conversation state changed"
        );
    }

    let mut messages: Vec<OutboundMessage> = Vec::new();
    for effect in transition.effects {
        match execute_effect(persistence, &user, effect, now) {
            Ok(mut produced) => messages.append(&mut produced),
            Err(err) => messages.push(OutboundMessage::text(err.to_reply())),
        }
    }

    UpdateOutcome {
        state: transition.state,
        messages,
    }
}

/// Translates a transport event into a state machine event.
///
/// # Errors
///
/// Returns an error if callback data names no known action.
pub fn translate_event(event: InboundEvent) -> Result<Event, ApiError> {
    match event {
        InboundEvent::Text { text } if text.trim() == START_COMMAND => Ok(Event::Start),
        InboundEvent::Text { text } => Ok(Event::Text(text)),
        InboundEvent::Document { file_name, content } => {
            Ok(Event::Document { file_name, content })
        }
        InboundEvent::Callback { data } => Action::from_str(&data)
            .map(Event::Action)
            .map_err(translate_core_error),
    }
}

fn execute_effect(
    persistence: &mut Persistence,
    user: &User,
    effect: Effect,
    now: OffsetDateTime,
) -> Result<Vec<OutboundMessage>, ApiError> {
    match effect {
        Effect::Reply(prompt) => Ok(vec![render_prompt(&prompt)]),
        Effect::ShowMenu(menu) => Ok(vec![render_menu(menu, user)]),
        Effect::IngestChecklist {
            area,
            file_name,
            format,
            content,
        } => {
            let checklist: Checklist =
                ingest_checklist(persistence, &file_name, area, format, &content)?;
            Ok(vec![OutboundMessage::text(format!(
                "✅ Checklist '{}' saved for area {} with {} items.",
                checklist.name,
                checklist.area,
                checklist.items.len()
            ))])
        }
        Effect::IngestSchedule {
            file_name,
            format,
            content,
        } => {
            let added: usize = ingest_schedule(persistence, &file_name, format, &content, now)?;
            Ok(vec![OutboundMessage::text(format!(
                "✅ Schedule updated: {added} inspections added."
            ))])
        }
        Effect::RegisterUser {
            user_id,
            full_name,
            role,
        } => {
            let created: User = register_user(persistence, user, user_id, full_name, role)?;
            Ok(vec![OutboundMessage::text(format!(
                "✅ User {} ({}) added as {}.",
                created.full_name,
                created.id,
                created.role.display_name()
            ))])
        }
        Effect::DeleteUser { user_id } => {
            delete_user(persistence, user, user_id)?;
            Ok(vec![OutboundMessage::text(format!(
                "✅ User {user_id} deleted."
            ))])
        }
        Effect::ShowSchedule => view_schedule(persistence, user),
        Effect::ShowStatistics => {
            let stats: Statistics = view_statistics(persistence, user)?;
            Ok(vec![OutboundMessage::text(format!(
                "📊 Your statistics\n\nPlanned inspections: {}\nCompleted inspections: {}\n\
                 Recorded inspections: {}\nProblems found: {}",
                stats.planned, stats.completed, stats.inspections, stats.problems
            ))])
        }
        Effect::CompleteInspection { checklist_id } => {
            complete_inspection(persistence, user, &checklist_id)?;
            Ok(vec![OutboundMessage::text(format!(
                "✅ Inspection for checklist {checklist_id} completed."
            ))])
        }
    }
}

/// Parses an uploaded checklist file and stores it.
///
/// The checklist is named after the file without its extension.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `file_name` - The uploaded file name
/// * `area` - The area entered before the upload
/// * `format` - The detected file format
/// * `content` - The file content
///
/// # Errors
///
/// Returns `ApiError::IngestionFailed` if the file does not parse, or a
/// translated store error. Nothing is stored in either case.
pub fn ingest_checklist(
    persistence: &mut Persistence,
    file_name: &str,
    area: AreaCode,
    format: TabularFormat,
    content: &[u8],
) -> Result<Checklist, ApiError> {
    let checklist: NewChecklist = checklist_from_upload(file_name, area, content, format)
        .map_err(|e| {
            error!(file_name, area, error = %e, "Checklist ingestion failed");
            ApiError::from(e)
        })?;

    let stored: Checklist = persistence.create_checklist(&checklist).map_err(|e| {
        error!(file_name, area, error = %e, "Failed to store checklist");
        translate_persistence_error(e)
    })?;

    info!(
        checklist_id = stored.id,
        checklist_name = %stored.name,
        area,
        items = stored.items.len(),
        "Ingested checklist"
    );
    Ok(stored)
}

/// Parses an uploaded schedule file and appends every row to the schedule
/// in one transaction.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `file_name` - The uploaded file name, for logging
/// * `format` - The detected file format
/// * `content` - The file content
/// * `now` - Creation time for every entry
///
/// # Returns
///
/// The number of entries added.
///
/// # Errors
///
/// Returns `ApiError::IngestionFailed` if any row does not convert, or a
/// translated store error such as a checklist id that is already active.
/// Nothing is stored in either case.
pub fn ingest_schedule(
    persistence: &mut Persistence,
    file_name: &str,
    format: TabularFormat,
    content: &[u8],
    now: OffsetDateTime,
) -> Result<usize, ApiError> {
    let entries: Vec<ActiveInspection> = schedule_from_upload(content, format, now)
        .map_err(|e| {
            error!(file_name, error = %e, "Schedule ingestion failed");
            ApiError::from(e)
        })?;

    persistence.add_active_inspections(&entries).map_err(|e| {
        error!(file_name, error = %e, "Failed to store schedule entries");
        translate_persistence_error(e)
    })?;

    info!(file_name, added = entries.len(), "Ingested schedule");
    Ok(entries.len())
}

/// Registers a user on behalf of an admin.
///
/// The chat user id doubles as the username. Team and area are taken from
/// the registering admin.
///
/// # Errors
///
/// Returns an error if the id is already registered or the store fails.
pub fn register_user(
    persistence: &mut Persistence,
    admin: &User,
    user_id: UserId,
    full_name: FullName,
    role: Role,
) -> Result<User, ApiError> {
    let new_user: NewUser = NewUser {
        id: user_id,
        full_name,
        role,
        username: user_id.to_string(),
        team: admin.team.clone(),
        area: admin.area,
    };

    let created: User = persistence
        .create_user(&new_user)
        .map_err(translate_persistence_error)?;

    info!(
        admin_id = admin.id,
        user_id,
        role = role.as_str(),
        "Admin registered user"
    );
    Ok(created)
}

/// Deletes a user on behalf of an admin.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the admin targets themselves, or a
/// translated store error if the user does not exist.
pub fn delete_user(
    persistence: &mut Persistence,
    admin: &User,
    user_id: UserId,
) -> Result<(), ApiError> {
    if admin.id == user_id {
        warn!(admin_id = admin.id, "Admin tried to delete themselves");
        return Err(ApiError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("You cannot delete yourself"),
        });
    }

    persistence
        .delete_user(user_id)
        .map_err(translate_persistence_error)?;

    info!(admin_id = admin.id, user_id, "Admin deleted user");
    Ok(())
}

/// Lists the active inspections visible to a user.
///
/// Inspectors see the entries they inspect and cleaners see the entries
/// naming them as cleaner. Admins see everything. Inspectors and admins
/// get a complete button on planned entries.
///
/// # Errors
///
/// Returns a translated store error.
pub fn view_schedule(
    persistence: &mut Persistence,
    user: &User,
) -> Result<Vec<OutboundMessage>, ApiError> {
    let own_id: String = user.id.to_string();
    let (filter, completable): (Option<ActiveFilter>, bool) = match user.role {
        Role::Admin => (None, true),
        Role::Checker => (Some(ActiveFilter::Inspector(own_id)), true),
        Role::User => (Some(ActiveFilter::Cleaner(own_id)), false),
    };

    let entries: Vec<ActiveInspection> = persistence
        .list_active_inspections(filter.as_ref())
        .map_err(translate_persistence_error)?;

    if entries.is_empty() {
        return Ok(vec![OutboundMessage::text("📭 No inspections are scheduled.")]);
    }

    Ok(entries
        .iter()
        .map(|entry| render_active_inspection(entry, completable))
        .collect())
}

/// Computes the statistics of a cleaner.
///
/// # Errors
///
/// Returns a translated store error.
pub fn view_statistics(
    persistence: &mut Persistence,
    user: &User,
) -> Result<Statistics, ApiError> {
    let cleaner_id: String = user.id.to_string();

    let active: Vec<ActiveInspection> = persistence
        .list_active_inspections(Some(&ActiveFilter::Cleaner(cleaner_id.clone())))
        .map_err(translate_persistence_error)?;
    let inspections: Vec<Inspection> = persistence
        .list_inspections_by_cleaner(&cleaner_id)
        .map_err(translate_persistence_error)?;

    Ok(Statistics {
        planned: active
            .iter()
            .filter(|e| e.status == InspectionStatus::Planned)
            .count(),
        completed: active
            .iter()
            .filter(|e| e.status == InspectionStatus::Completed)
            .count(),
        inspections: inspections.len(),
        problems: inspections.iter().map(|i| i.problems.len()).sum(),
    })
}

/// Completes an active inspection and frees its inspector.
///
/// Completion is a single store write that removes the entry and frees
/// its inspector. The removed entry's status is not stored separately.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no active entry uses the
/// checklist id, or `ApiError::AccessDenied` if the user is neither the
/// assigned inspector nor an admin.
pub fn complete_inspection(
    persistence: &mut Persistence,
    user: &User,
    checklist_id: &str,
) -> Result<Schedule, ApiError> {
    let entry: ActiveInspection = persistence
        .find_active_inspection(checklist_id)
        .map_err(translate_persistence_error)?;

    AuthorizationService::authorize_complete(user, &entry)?;

    let schedule: Schedule = persistence
        .move_to_free(checklist_id)
        .map_err(translate_persistence_error)?;

    info!(user_id = user.id, checklist_id, "Completed inspection");
    Ok(schedule)
}
