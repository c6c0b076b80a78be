// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checklist mutations.
//!
//! Items are addressed by `(checklist_id, item_order)`, never by position.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use cleaning_bot_domain::{ChecklistId, NewChecklist, validate_item_orders};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{checklist_items, checklists};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a checklist with its items exactly as given.
///
/// Orders are not renumbered. The caller runs this inside a transaction so
/// a failing item leaves no partial checklist behind.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `checklist` - The checklist to insert
/// * `created_at` - Formatted creation timestamp
///
/// # Errors
///
/// Returns `PersistenceError::Domain` if two items share an order, or an
/// error if an insert fails.
pub fn insert_checklist(
    conn: &mut _,
    checklist: &NewChecklist,
    created_at: &str,
) -> Result<ChecklistId, PersistenceError> {
    validate_item_orders(&checklist.items)?;

    diesel::insert_into(checklists::table)
        .values((
            checklists::name.eq(&checklist.name),
            checklists::area.eq(checklist.area),
            checklists::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let checklist_id: ChecklistId = conn.get_last_insert_rowid()?;

    for item in &checklist.items {
        diesel::insert_into(checklist_items::table)
            .values((
                checklist_items::checklist_id.eq(checklist_id),
                checklist_items::item_type.eq(&item.item_type),
                checklist_items::item_order.eq(item.order),
                checklist_items::description.eq(&item.description),
                checklist_items::mark.eq(i32::from(item.mark)),
            ))
            .execute(conn)?;
    }

    info!(
        checklist_id,
        checklist_name = %checklist.name,
        area = checklist.area,
        items = checklist.items.len(),
        "Created checklist"
    );

    Ok(checklist_id)
}
}

backend_fn! {
/// Sets the mark of the item with this order.
///
/// The caller checks that the checklist and the item exist.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_item_mark(
    conn: &mut _,
    checklist_id: ChecklistId,
    order: i32,
    mark: bool,
) -> Result<(), PersistenceError> {
    diesel::update(checklist_items::table)
        .filter(checklist_items::checklist_id.eq(checklist_id))
        .filter(checklist_items::item_order.eq(order))
        .set(checklist_items::mark.eq(i32::from(mark)))
        .execute(conn)?;

    info!(checklist_id, order, mark, "Updated checklist item mark");
    Ok(())
}
}

backend_fn! {
/// Deletes the item with this order.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the checklist has no such item.
pub fn delete_item(
    conn: &mut _,
    checklist_id: ChecklistId,
    order: i32,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        checklist_items::table
            .filter(checklist_items::checklist_id.eq(checklist_id))
            .filter(checklist_items::item_order.eq(order)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "item with order {order} in checklist {checklist_id}"
        )));
    }

    info!(checklist_id, order, "Deleted checklist item");
    Ok(())
}
}

backend_fn! {
/// Deletes a checklist. Its items go with it through the foreign key
/// cascade.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no checklist has this id.
pub fn delete_checklist(conn: &mut _, checklist_id: ChecklistId) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(checklists::table.find(checklist_id)).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("checklist {checklist_id}")));
    }

    info!(checklist_id, "Deleted checklist");
    Ok(())
}
}
