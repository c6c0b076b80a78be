// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule aggregate mutations.
//!
//! These are single-statement primitives. The `Persistence` adapter runs
//! each schedule operation as one transaction composed from them.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use cleaning_bot_domain::{ActiveInspection, InspectionStatus};

use crate::data_models::{SCHEDULE_SINGLETON_KEY, format_date, format_timestamp, now_timestamp};
use crate::diesel_schema::{schedule_active_inspections, schedule_free_inspectors, schedules};
use crate::error::PersistenceError;

backend_fn! {
/// Returns the schedule row id, creating the row if it does not exist.
///
/// Concurrent creators race on the unique singleton key. The losers'
/// inserts are ignored and everyone reads back the same row.
///
/// # Errors
///
/// Returns an error if the insert or the read-back fails.
pub fn ensure_schedule(conn: &mut _) -> Result<i64, PersistenceError> {
    let created_at: String = now_timestamp()?;

    let inserted: usize = diesel::insert_or_ignore_into(schedules::table)
        .values((
            schedules::singleton_key.eq(SCHEDULE_SINGLETON_KEY),
            schedules::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    if inserted > 0 {
        info!("Created schedule aggregate");
    }

    Ok(schedules::table
        .filter(schedules::singleton_key.eq(SCHEDULE_SINGLETON_KEY))
        .select(schedules::schedule_id)
        .first::<i64>(conn)?)
}
}

backend_fn! {
/// Appends an active inspection.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateChecklistId` if an active entry
/// already uses the checklist id.
pub fn insert_active(
    conn: &mut _,
    schedule_id: i64,
    entry: &ActiveInspection,
) -> Result<(), PersistenceError> {
    let existing: Option<i64> = schedule_active_inspections::table
        .filter(schedule_active_inspections::schedule_id.eq(schedule_id))
        .filter(schedule_active_inspections::checklist_id.eq(&entry.checklist_id))
        .select(schedule_active_inspections::entry_id)
        .first::<i64>(conn)
        .optional()?;

    if existing.is_some() {
        return Err(PersistenceError::DuplicateChecklistId(
            entry.checklist_id.clone(),
        ));
    }

    let updated_at: Option<String> = entry.updated_at.map(format_timestamp).transpose()?;

    diesel::insert_into(schedule_active_inspections::table)
        .values((
            schedule_active_inspections::schedule_id.eq(schedule_id),
            schedule_active_inspections::inspection_date.eq(format_date(entry.date)),
            schedule_active_inspections::area.eq(entry.area),
            schedule_active_inspections::cleaner_id.eq(&entry.cleaner_id),
            schedule_active_inspections::inspector_id.eq(&entry.inspector_id),
            schedule_active_inspections::checklist_id.eq(&entry.checklist_id),
            schedule_active_inspections::status.eq(entry.status.as_str()),
            schedule_active_inspections::created_at.eq(format_timestamp(entry.created_at)?),
            schedule_active_inspections::updated_at.eq(updated_at),
        ))
        .execute(conn)?;

    debug!(checklist_id = %entry.checklist_id, "Inserted active inspection");
    Ok(())
}
}

backend_fn! {
/// Sets the status of an existing active entry and stamps `updated_at`.
///
/// The caller checks that the entry exists.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_active_status(
    conn: &mut _,
    schedule_id: i64,
    checklist_id: &str,
    status: InspectionStatus,
) -> Result<(), PersistenceError> {
    let updated_at: String = now_timestamp()?;

    diesel::update(schedule_active_inspections::table)
        .filter(schedule_active_inspections::schedule_id.eq(schedule_id))
        .filter(schedule_active_inspections::checklist_id.eq(checklist_id))
        .set((
            schedule_active_inspections::status.eq(status.as_str()),
            schedule_active_inspections::updated_at.eq(Some(updated_at)),
        ))
        .execute(conn)?;

    info!(checklist_id, status = status.as_str(), "Updated inspection status");
    Ok(())
}
}

backend_fn! {
/// Deletes the active entry using a checklist id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no entry was deleted.
pub fn delete_active(
    conn: &mut _,
    schedule_id: i64,
    checklist_id: &str,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        schedule_active_inspections::table
            .filter(schedule_active_inspections::schedule_id.eq(schedule_id))
            .filter(schedule_active_inspections::checklist_id.eq(checklist_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "active inspection with checklist id '{checklist_id}'"
        )));
    }

    info!(checklist_id, "Removed active inspection");
    Ok(())
}
}

backend_fn! {
/// Adds an inspector to the free set. Adding a member again is a no-op.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_free_inspector(
    conn: &mut _,
    schedule_id: i64,
    inspector_id: &str,
) -> Result<(), PersistenceError> {
    let inserted: usize = diesel::insert_or_ignore_into(schedule_free_inspectors::table)
        .values((
            schedule_free_inspectors::schedule_id.eq(schedule_id),
            schedule_free_inspectors::inspector_id.eq(inspector_id),
        ))
        .execute(conn)?;

    debug!(inspector_id, inserted, "Added free inspector");
    Ok(())
}
}

backend_fn! {
/// Removes an inspector from the free set.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the inspector was not free.
pub fn delete_free_inspector(
    conn: &mut _,
    schedule_id: i64,
    inspector_id: &str,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        schedule_free_inspectors::table
            .filter(schedule_free_inspectors::schedule_id.eq(schedule_id))
            .filter(schedule_free_inspectors::inspector_id.eq(inspector_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "free inspector '{inspector_id}'"
        )));
    }

    info!(inspector_id, "Removed free inspector");
    Ok(())
}
}
