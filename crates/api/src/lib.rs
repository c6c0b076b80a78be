// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chat boundary for the cleaning inspection bot.
//!
//! This crate sits between the chat transport and the core state machine.
//! It guards senders against the user store, enforces roles, parses
//! uploaded tables and turns state machine effects into store writes and
//! outbound messages.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod intake;
mod menus;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    START_COMMAND, Statistics, UpdateOutcome, complete_inspection, delete_user, handle_update,
    ingest_checklist, ingest_schedule, register_user, translate_event, view_schedule,
    view_statistics,
};
pub use intake::{
    IngestionError, SCHEDULE_COLUMNS, ScheduleRecord, checklist_from_upload, checklist_name,
    parse_checklist_rows, parse_schedule_rows, schedule_from_upload,
};
pub use menus::{render_active_inspection, render_menu, render_prompt};
pub use request_response::{
    Button, ChatUpdate, InboundEvent, Keyboard, OutboundMessage, WebhookResponse,
};
