// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inspection queries.
//!
//! Every listing loads the problems of all matched inspections with a
//! single `IN` query and stitches them together in memory.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use time::Date;
use tracing::debug;

use cleaning_bot_domain::{AreaCode, Inspection, InspectionId, Problem};

use crate::data_models::{InspectionRow, ProblemRow, assemble_inspections, format_date};
use crate::diesel_schema::{inspection_problems, inspections};
use crate::error::PersistenceError;

backend_fn! {
/// Returns true if an inspection with this id exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn inspection_exists(
    conn: &mut _,
    inspection_id: InspectionId,
) -> Result<bool, PersistenceError> {
    Ok(inspections::table
        .find(inspection_id)
        .select(inspections::inspection_id)
        .first::<i64>(conn)
        .optional()?
        .is_some())
}
}

backend_fn! {
/// Retrieves an inspection with its problems.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no inspection has this id.
pub fn get_inspection(
    conn: &mut _,
    inspection_id: InspectionId,
) -> Result<Inspection, PersistenceError> {
    debug!(inspection_id, "Looking up inspection");

    let row: InspectionRow = inspections::table
        .find(inspection_id)
        .select(InspectionRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("inspection {inspection_id}")))?;

    let problems: Vec<ProblemRow> = inspection_problems::table
        .filter(inspection_problems::inspection_id.eq(inspection_id))
        .order(inspection_problems::problem_id.asc())
        .select(ProblemRow::as_select())
        .load(conn)?;

    assemble_inspections(vec![row], problems)?
        .pop()
        .ok_or_else(|| PersistenceError::NotFound(format!("inspection {inspection_id}")))
}
}

backend_fn! {
/// Lists the inspections of an area, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is corrupt.
pub fn list_inspections_by_area(
    conn: &mut _,
    area: AreaCode,
) -> Result<Vec<Inspection>, PersistenceError> {
    let rows: Vec<InspectionRow> = inspections::table
        .filter(inspections::area.eq(area))
        .order(inspections::inspection_id.asc())
        .select(InspectionRow::as_select())
        .load(conn)?;

    let ids: Vec<i64> = rows.iter().map(|row| row.inspection_id).collect();
    let problems: Vec<ProblemRow> = inspection_problems::table
        .filter(inspection_problems::inspection_id.eq_any(&ids))
        .order(inspection_problems::problem_id.asc())
        .select(ProblemRow::as_select())
        .load(conn)?;

    assemble_inspections(rows, problems)
}
}

backend_fn! {
/// Lists the inspections of one cleaner, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is corrupt.
pub fn list_inspections_by_cleaner(
    conn: &mut _,
    cleaner_id: &str,
) -> Result<Vec<Inspection>, PersistenceError> {
    let rows: Vec<InspectionRow> = inspections::table
        .filter(inspections::cleaner_id.eq(cleaner_id))
        .order(inspections::inspection_id.asc())
        .select(InspectionRow::as_select())
        .load(conn)?;

    let ids: Vec<i64> = rows.iter().map(|row| row.inspection_id).collect();
    let problems: Vec<ProblemRow> = inspection_problems::table
        .filter(inspection_problems::inspection_id.eq_any(&ids))
        .order(inspection_problems::problem_id.asc())
        .select(ProblemRow::as_select())
        .load(conn)?;

    assemble_inspections(rows, problems)
}
}

backend_fn! {
/// Lists the inspections performed by one inspector, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is corrupt.
pub fn list_inspections_by_inspector(
    conn: &mut _,
    inspector_id: &str,
) -> Result<Vec<Inspection>, PersistenceError> {
    let rows: Vec<InspectionRow> = inspections::table
        .filter(inspections::inspector_id.eq(inspector_id))
        .order(inspections::inspection_id.asc())
        .select(InspectionRow::as_select())
        .load(conn)?;

    let ids: Vec<i64> = rows.iter().map(|row| row.inspection_id).collect();
    let problems: Vec<ProblemRow> = inspection_problems::table
        .filter(inspection_problems::inspection_id.eq_any(&ids))
        .order(inspection_problems::problem_id.asc())
        .select(ProblemRow::as_select())
        .load(conn)?;

    assemble_inspections(rows, problems)
}
}

backend_fn! {
/// Lists inspections dated within `start..=end`, ordered by date.
///
/// Dates are stored as `YYYY-MM-DD`, so text comparison matches calendar
/// order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is corrupt.
pub fn list_inspections_by_date_range(
    conn: &mut _,
    start: Date,
    end: Date,
) -> Result<Vec<Inspection>, PersistenceError> {
    let rows: Vec<InspectionRow> = inspections::table
        .filter(inspections::inspection_date.ge(format_date(start)))
        .filter(inspections::inspection_date.le(format_date(end)))
        .order((
            inspections::inspection_date.asc(),
            inspections::inspection_id.asc(),
        ))
        .select(InspectionRow::as_select())
        .load(conn)?;

    let ids: Vec<i64> = rows.iter().map(|row| row.inspection_id).collect();
    let problems: Vec<ProblemRow> = inspection_problems::table
        .filter(inspection_problems::inspection_id.eq_any(&ids))
        .order(inspection_problems::problem_id.asc())
        .select(ProblemRow::as_select())
        .load(conn)?;

    assemble_inspections(rows, problems)
}
}

backend_fn! {
/// Lists the problems of one inspection in the order they were recorded.
///
/// The caller checks that the inspection exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_problems(
    conn: &mut _,
    inspection_id: InspectionId,
) -> Result<Vec<Problem>, PersistenceError> {
    let rows: Vec<ProblemRow> = inspection_problems::table
        .filter(inspection_problems::inspection_id.eq(inspection_id))
        .order(inspection_problems::problem_id.asc())
        .select(ProblemRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Problem::from).collect())
}
}
