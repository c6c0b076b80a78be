// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checklist queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use cleaning_bot_domain::{AreaCode, Checklist, ChecklistId};

use crate::data_models::{ChecklistItemRow, ChecklistRow, assemble_checklists};
use crate::diesel_schema::{checklist_items, checklists};
use crate::error::PersistenceError;

backend_fn! {
/// Returns true if a checklist with this id exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn checklist_exists(conn: &mut _, checklist_id: ChecklistId) -> Result<bool, PersistenceError> {
    Ok(checklists::table
        .find(checklist_id)
        .select(checklists::checklist_id)
        .first::<i64>(conn)
        .optional()?
        .is_some())
}
}

backend_fn! {
/// Retrieves a checklist and its items by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no checklist has this id.
pub fn get_checklist(
    conn: &mut _,
    checklist_id: ChecklistId,
) -> Result<Checklist, PersistenceError> {
    debug!(checklist_id, "Looking up checklist");

    let row: ChecklistRow = checklists::table
        .find(checklist_id)
        .select(ChecklistRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("checklist {checklist_id}")))?;

    let items: Vec<ChecklistItemRow> = checklist_items::table
        .filter(checklist_items::checklist_id.eq(checklist_id))
        .order(checklist_items::item_id.asc())
        .select(ChecklistItemRow::as_select())
        .load(conn)?;

    assemble_checklists(vec![row], items)?
        .pop()
        .ok_or_else(|| PersistenceError::NotFound(format!("checklist {checklist_id}")))
}
}

backend_fn! {
/// Retrieves the first checklist stored under a name.
///
/// Names are not unique. The oldest match wins.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no checklist has this name.
pub fn get_checklist_by_name(conn: &mut _, name: &str) -> Result<Checklist, PersistenceError> {
    debug!(checklist_name = name, "Looking up checklist by name");

    let row: ChecklistRow = checklists::table
        .filter(checklists::name.eq(name))
        .order(checklists::checklist_id.asc())
        .select(ChecklistRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("checklist named '{name}'")))?;

    let items: Vec<ChecklistItemRow> = checklist_items::table
        .filter(checklist_items::checklist_id.eq(row.checklist_id))
        .order(checklist_items::item_id.asc())
        .select(ChecklistItemRow::as_select())
        .load(conn)?;

    assemble_checklists(vec![row], items)?
        .pop()
        .ok_or_else(|| PersistenceError::NotFound(format!("checklist named '{name}'")))
}
}

backend_fn! {
/// Lists every checklist in an area, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is corrupt.
pub fn list_checklists_by_area(
    conn: &mut _,
    area: AreaCode,
) -> Result<Vec<Checklist>, PersistenceError> {
    let rows: Vec<ChecklistRow> = checklists::table
        .filter(checklists::area.eq(area))
        .order(checklists::checklist_id.asc())
        .select(ChecklistRow::as_select())
        .load(conn)?;

    let ids: Vec<i64> = rows.iter().map(|row| row.checklist_id).collect();
    let items: Vec<ChecklistItemRow> = checklist_items::table
        .filter(checklist_items::checklist_id.eq_any(&ids))
        .order(checklist_items::item_id.asc())
        .select(ChecklistItemRow::as_select())
        .load(conn)?;

    debug!(area, count = rows.len(), "Listed checklists");
    assemble_checklists(rows, items)
}
}

backend_fn! {
/// Returns true if the checklist has an item with this order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn item_exists(
    conn: &mut _,
    checklist_id: ChecklistId,
    order: i32,
) -> Result<bool, PersistenceError> {
    Ok(checklist_items::table
        .filter(checklist_items::checklist_id.eq(checklist_id))
        .filter(checklist_items::item_order.eq(order))
        .select(checklist_items::item_id)
        .first::<i64>(conn)
        .optional()?
        .is_some())
}
}
