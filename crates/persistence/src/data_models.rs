// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between stored columns and domain types.
//!
//! Timestamps are stored as RFC 3339 text, calendar dates as `YYYY-MM-DD`
//! text and booleans as `0`/`1` integers, identically on both backends.

use diesel::prelude::*;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use cleaning_bot_domain::{
    ActiveInspection, Checklist, ChecklistItem, FullName, Inspection, InspectionStatus, Problem,
    Role, User, parse_date,
};

use crate::diesel_schema::{
    checklist_items, checklists, inspection_problems, inspections, schedule_active_inspections,
    users,
};
use crate::error::PersistenceError;

/// Key of the single row in `schedules`.
pub const SCHEDULE_SINGLETON_KEY: i32 = 1;

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::CorruptTimestamp(e.to_string()))
}

/// The current UTC time, formatted for storage.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptTimestamp` if the text is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::CorruptTimestamp(format!("{value}: {e}")))
}

/// Formats a calendar date for storage.
#[must_use]
pub fn format_date(value: Date) -> String {
    value.to_string()
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: i64,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub role: String,
    pub username: String,
    pub team: String,
    pub area: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.user_id,
            full_name: FullName::new(&row.surname, &row.name, &row.patronymic),
            role: Role::from_str(&row.role)?,
            username: row.username,
            team: row.team,
            area: row.area,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = checklists)]
pub struct ChecklistRow {
    pub checklist_id: i64,
    pub name: String,
    pub area: i32,
    pub created_at: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = checklist_items)]
pub struct ChecklistItemRow {
    pub item_id: i64,
    pub checklist_id: i64,
    pub item_type: String,
    pub item_order: i32,
    pub description: String,
    pub mark: i32,
}

impl From<ChecklistItemRow> for ChecklistItem {
    fn from(row: ChecklistItemRow) -> Self {
        Self {
            item_type: row.item_type,
            order: row.item_order,
            description: row.description,
            mark: row.mark != 0,
        }
    }
}

/// Builds checklists from their rows and the items of all of them.
///
/// Items must already be sorted by `item_id`.
///
/// # Errors
///
/// Returns an error if a stored timestamp is corrupt.
pub fn assemble_checklists(
    rows: Vec<ChecklistRow>,
    items: Vec<ChecklistItemRow>,
) -> Result<Vec<Checklist>, PersistenceError> {
    let mut checklists: Vec<Checklist> = rows
        .into_iter()
        .map(|row| {
            Ok(Checklist {
                id: row.checklist_id,
                name: row.name,
                area: row.area,
                items: Vec::new(),
                created_at: parse_timestamp(&row.created_at)?,
            })
        })
        .collect::<Result<_, PersistenceError>>()?;

    for item in items {
        if let Some(checklist) = checklists.iter_mut().find(|c| c.id == item.checklist_id) {
            checklist.items.push(item.into());
        }
    }

    Ok(checklists)
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = inspections)]
pub struct InspectionRow {
    pub inspection_id: i64,
    pub inspection_date: String,
    pub area: i32,
    pub cleaner_id: String,
    pub inspector_id: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = inspection_problems)]
pub struct ProblemRow {
    pub problem_id: i64,
    pub inspection_id: i64,
    pub description: String,
    pub photo_ref: Option<String>,
}

impl From<ProblemRow> for Problem {
    fn from(row: ProblemRow) -> Self {
        Self {
            id: Some(row.problem_id),
            description: row.description,
            photo_ref: row.photo_ref,
        }
    }
}

/// Builds inspections from their rows and the problems of all of them.
///
/// Problems must already be sorted by `problem_id`.
///
/// # Errors
///
/// Returns an error if a stored date is corrupt.
pub fn assemble_inspections(
    rows: Vec<InspectionRow>,
    problems: Vec<ProblemRow>,
) -> Result<Vec<Inspection>, PersistenceError> {
    let mut inspections: Vec<Inspection> = rows
        .into_iter()
        .map(|row| {
            Ok(Inspection {
                id: row.inspection_id,
                date: parse_date(&row.inspection_date)?,
                area: row.area,
                cleaner_id: row.cleaner_id,
                inspector_id: row.inspector_id,
                problems: Vec::new(),
            })
        })
        .collect::<Result<_, PersistenceError>>()?;

    for problem in problems {
        if let Some(inspection) = inspections
            .iter_mut()
            .find(|i| i.id == problem.inspection_id)
        {
            inspection.problems.push(problem.into());
        }
    }

    Ok(inspections)
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = schedule_active_inspections)]
pub struct ActiveInspectionRow {
    pub entry_id: i64,
    pub schedule_id: i64,
    pub inspection_date: String,
    pub area: i32,
    pub cleaner_id: String,
    pub inspector_id: Option<String>,
    pub checklist_id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl TryFrom<ActiveInspectionRow> for ActiveInspection {
    type Error = PersistenceError;

    fn try_from(row: ActiveInspectionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&row.inspection_date)?,
            area: row.area,
            cleaner_id: row.cleaner_id,
            inspector_id: row.inspector_id,
            checklist_id: row.checklist_id,
            status: InspectionStatus::from_str(&row.status)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: row.updated_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}
