// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule aggregate queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use cleaning_bot_domain::{ActiveInspection, Schedule};

use crate::data_models::ActiveInspectionRow;
use crate::diesel_schema::{schedule_active_inspections, schedule_free_inspectors};
use crate::error::PersistenceError;

backend_fn! {
/// Loads the full schedule aggregate.
///
/// Active entries and free inspectors come back in insertion order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `schedule_id` - The schedule row id
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is corrupt.
pub fn load_schedule(conn: &mut _, schedule_id: i64) -> Result<Schedule, PersistenceError> {
    let rows: Vec<ActiveInspectionRow> = schedule_active_inspections::table
        .filter(schedule_active_inspections::schedule_id.eq(schedule_id))
        .order(schedule_active_inspections::entry_id.asc())
        .select(ActiveInspectionRow::as_select())
        .load(conn)?;

    let active_inspectors: Vec<ActiveInspection> = rows
        .into_iter()
        .map(ActiveInspection::try_from)
        .collect::<Result<_, PersistenceError>>()?;

    let free_inspectors: Vec<String> = schedule_free_inspectors::table
        .filter(schedule_free_inspectors::schedule_id.eq(schedule_id))
        .order(schedule_free_inspectors::free_id.asc())
        .select(schedule_free_inspectors::inspector_id)
        .load(conn)?;

    debug!(
        schedule_id,
        active = active_inspectors.len(),
        free = free_inspectors.len(),
        "Loaded schedule"
    );

    Ok(Schedule {
        active_inspectors,
        free_inspectors,
    })
}
}

backend_fn! {
/// Finds the active entry that uses a checklist id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is corrupt.
pub fn find_active(
    conn: &mut _,
    schedule_id: i64,
    checklist_id: &str,
) -> Result<Option<ActiveInspection>, PersistenceError> {
    debug!(schedule_id, checklist_id, "Looking up active inspection");

    schedule_active_inspections::table
        .filter(schedule_active_inspections::schedule_id.eq(schedule_id))
        .filter(schedule_active_inspections::checklist_id.eq(checklist_id))
        .select(ActiveInspectionRow::as_select())
        .first(conn)
        .optional()?
        .map(ActiveInspection::try_from)
        .transpose()
}
}
