// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inspection mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use cleaning_bot_domain::{InspectionId, NewInspection, Problem};

use crate::backend::PersistenceBackend;
use crate::data_models::format_date;
use crate::diesel_schema::{inspection_problems, inspections};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an inspection and its initial problems.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn insert_inspection(
    conn: &mut _,
    inspection: &NewInspection,
) -> Result<InspectionId, PersistenceError> {
    diesel::insert_into(inspections::table)
        .values((
            inspections::inspection_date.eq(format_date(inspection.date)),
            inspections::area.eq(inspection.area),
            inspections::cleaner_id.eq(&inspection.cleaner_id),
            inspections::inspector_id.eq(&inspection.inspector_id),
        ))
        .execute(conn)?;

    let inspection_id: InspectionId = conn.get_last_insert_rowid()?;

    for problem in &inspection.problems {
        diesel::insert_into(inspection_problems::table)
            .values((
                inspection_problems::inspection_id.eq(inspection_id),
                inspection_problems::description.eq(&problem.description),
                inspection_problems::photo_ref.eq(&problem.photo_ref),
            ))
            .execute(conn)?;
    }

    info!(
        inspection_id,
        area = inspection.area,
        problems = inspection.problems.len(),
        "Created inspection"
    );

    Ok(inspection_id)
}
}

backend_fn! {
/// Appends a problem to an inspection and returns it with its new id.
///
/// The caller checks that the inspection exists.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_problem(
    conn: &mut _,
    inspection_id: InspectionId,
    problem: &Problem,
) -> Result<Problem, PersistenceError> {
    diesel::insert_into(inspection_problems::table)
        .values((
            inspection_problems::inspection_id.eq(inspection_id),
            inspection_problems::description.eq(&problem.description),
            inspection_problems::photo_ref.eq(&problem.photo_ref),
        ))
        .execute(conn)?;

    let problem_id: i64 = conn.get_last_insert_rowid()?;
    info!(inspection_id, problem_id, "Added inspection problem");

    Ok(Problem {
        id: Some(problem_id),
        description: problem.description.clone(),
        photo_ref: problem.photo_ref.clone(),
    })
}
}

backend_fn! {
/// Deletes one problem of an inspection by its id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the inspection has no problem
/// with this id.
pub fn delete_problem(
    conn: &mut _,
    inspection_id: InspectionId,
    problem_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        inspection_problems::table
            .filter(inspection_problems::inspection_id.eq(inspection_id))
            .filter(inspection_problems::problem_id.eq(problem_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "problem {problem_id} of inspection {inspection_id}"
        )));
    }

    info!(inspection_id, problem_id, "Deleted inspection problem");
    Ok(())
}
}

backend_fn! {
/// Deletes an inspection together with its problems.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no inspection has this id.
pub fn delete_inspection(
    conn: &mut _,
    inspection_id: InspectionId,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(inspections::table.find(inspection_id)).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("inspection {inspection_id}")));
    }

    info!(inspection_id, "Deleted inspection");
    Ok(())
}
}
