// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tabular intake for checklist and schedule uploads.
//!
//! Uploaded files are Excel workbooks (first sheet) or CSV/TSV text, all
//! without a header row. Parsing never touches the stores. A file either
//! converts completely or yields an `IngestionError`, so callers write all
//! of its records or none.

use calamine::{Data, Reader, Xls, Xlsx};
use std::fmt::Display;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use time::{Date, Duration, Month, OffsetDateTime};
use tracing::{debug, warn};

use cleaning_bot::TabularFormat;
use cleaning_bot_domain::{
    ActiveInspection, AreaCode, InspectionStatus, NewChecklist, parse_date,
};

/// Number of columns in a schedule row.
pub const SCHEDULE_COLUMNS: usize = 5;

/// Intake errors. Row numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestionError {
    /// A row is not valid UTF-8.
    #[error("row {row} is not valid UTF-8 text")]
    InvalidEncoding { row: usize },

    /// The reader could not split the table.
    #[error("row {row} could not be read: {reason}")]
    MalformedTable { row: usize, reason: String },

    /// A schedule row has the wrong number of cells.
    #[error("row {row} has {found} columns, expected {expected}")]
    WrongColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The workbook could not be opened or has no worksheet.
    #[error("the spreadsheet could not be read: {reason}")]
    UnreadableSpreadsheet { reason: String },

    /// A row has the right shape but a cell does not convert.
    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// A checklist file has no non-blank cells in its first column.
    #[error("the file contains no checklist items")]
    EmptyChecklist,
}

/// One parsed schedule row before conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    /// Position of the row in the file, starting at 1.
    pub row: usize,
    pub cleaner_id: String,
    pub inspector_id: String,
    pub checklist_id: String,
    /// Raw area cell.
    pub area: String,
    /// Raw date cell.
    pub date: String,
    /// The day the file was parsed.
    pub created_at: Date,
    pub status: InspectionStatus,
    pub updated_at: Option<OffsetDateTime>,
}

impl ScheduleRecord {
    /// Converts this row into an active inspection.
    ///
    /// # Arguments
    ///
    /// * `created_at` - The creation timestamp to stamp on the entry
    ///
    /// # Errors
    ///
    /// Returns `IngestionError::InvalidRow` if the area is not an integer,
    /// the date is not `YYYY-MM-DD`, or the cleaner or checklist id is blank.
    pub fn to_active_inspection(
        &self,
        created_at: OffsetDateTime,
    ) -> Result<ActiveInspection, IngestionError> {
        let cleaner_id: &str = self.cleaner_id.trim();
        if cleaner_id.is_empty() {
            return Err(self.invalid("cleaner id is empty"));
        }

        let checklist_id: &str = self.checklist_id.trim();
        if checklist_id.is_empty() {
            return Err(self.invalid("checklist id is empty"));
        }

        let area: AreaCode = self
            .area
            .trim()
            .parse::<AreaCode>()
            .map_err(|_| self.invalid(&format!("area '{}' is not a number", self.area.trim())))?;

        let date: Date = parse_date(&self.date).map_err(|e| self.invalid(&e.to_string()))?;

        let inspector_id: Option<String> = Some(self.inspector_id.trim())
            .filter(|id| !id.is_empty())
            .map(ToString::to_string);

        Ok(ActiveInspection {
            date,
            area,
            cleaner_id: cleaner_id.to_string(),
            inspector_id,
            checklist_id: checklist_id.to_string(),
            status: self.status,
            created_at,
            updated_at: self.updated_at,
        })
    }

    fn invalid(&self, reason: &str) -> IngestionError {
        IngestionError::InvalidRow {
            row: self.row,
            reason: reason.to_string(),
        }
    }
}

/// One non-blank row of an uploaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    /// Position in the file, starting at 1.
    number: usize,
    cells: Vec<String>,
}

impl Row {
    fn cell(&self, index: usize) -> String {
        self.cells
            .get(index)
            .map(|cell| cell.trim().to_string())
            .unwrap_or_default()
    }
}

type Upload = Cursor<Vec<u8>>;

/// Serial day number of 9999-12-31, the last date a workbook can hold.
const LAST_SERIAL_DAY: f64 = 2_958_465.0;

fn read_rows(content: &[u8], format: TabularFormat) -> Result<Vec<Row>, IngestionError> {
    match format.delimiter() {
        Some(delimiter) => read_delimited(content, delimiter),
        None if format == TabularFormat::Xls => read_workbook::<Xls<Upload>>(content),
        None => read_workbook::<Xlsx<Upload>>(content),
    }
}

fn read_delimited(content: &[u8], delimiter: u8) -> Result<Vec<Row>, IngestionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content);

    reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            let number: usize = index + 1;
            record
                .map(|record| Row {
                    number,
                    cells: record.iter().map(ToString::to_string).collect(),
                })
                .map_err(|e| {
                    warn!(row = number, error = %e, "Failed to read uploaded table");
                    match e.kind() {
                        csv::ErrorKind::Utf8 { .. } => {
                            IngestionError::InvalidEncoding { row: number }
                        }
                        _ => IngestionError::MalformedTable {
                            row: number,
                            reason: e.to_string(),
                        },
                    }
                })
        })
        .collect()
}

/// Reads the first worksheet. Blank rows are skipped and trailing empty
/// cells are dropped, so a row's width is its last filled column.
fn read_workbook<R>(content: &[u8]) -> Result<Vec<Row>, IngestionError>
where
    R: Reader<Upload>,
    R::Error: Display,
{
    let unreadable = |reason: String| {
        warn!(%reason, "Failed to read uploaded spreadsheet");
        IngestionError::UnreadableSpreadsheet { reason }
    };

    let mut workbook: R =
        R::new(Cursor::new(content.to_vec())).map_err(|e| unreadable(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unreadable(String::from("the workbook has no worksheet")))?
        .map_err(|e| unreadable(e.to_string()))?;

    let first_row: usize = range
        .start()
        .and_then(|(row, _)| usize::try_from(row).ok())
        .unwrap_or_default();
    let rows: Vec<Row> = range
        .rows()
        .enumerate()
        .filter_map(|(index, cells)| {
            let mut cells: Vec<String> = cells.iter().map(cell_text).collect();
            while cells.last().is_some_and(|cell| cell.trim().is_empty()) {
                cells.pop();
            }
            (!cells.is_empty()).then_some(Row {
                number: first_row + index + 1,
                cells,
            })
        })
        .collect();

    debug!(rows = rows.len(), "Read uploaded spreadsheet");
    Ok(rows)
}

/// Text of one spreadsheet cell. Date cells become `YYYY-MM-DD`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(value) if value.is_datetime() => {
            serial_date(value.as_f64()).map_or_else(|| cell.to_string(), |date| date.to_string())
        }
        Data::DateTimeIso(value) => value
            .split_once('T')
            .map_or_else(|| value.clone(), |(date, _)| date.to_string()),
        _ => cell.to_string(),
    }
}

/// Converts a spreadsheet serial day number to a date. The time of day
/// is dropped.
#[allow(clippy::cast_possible_truncation)]
fn serial_date(serial: f64) -> Option<Date> {
    if !(0.0..=LAST_SERIAL_DAY).contains(&serial) {
        return None;
    }
    let epoch: Date = Date::from_calendar_date(1899, Month::December, 30).ok()?;
    epoch.checked_add(Duration::days(serial.floor() as i64))
}

/// Reads checklist item descriptions from the first column.
///
/// Cells are trimmed and blank cells are dropped. The remaining order is
/// the item order.
///
/// # Errors
///
/// Returns an error if the table cannot be read.
pub fn parse_checklist_rows(
    content: &[u8],
    format: TabularFormat,
) -> Result<Vec<String>, IngestionError> {
    let descriptions: Vec<String> = read_rows(content, format)?
        .iter()
        .map(|row| row.cell(0))
        .filter(|cell| !cell.is_empty())
        .collect();

    debug!(items = descriptions.len(), "Parsed checklist rows");
    Ok(descriptions)
}

/// Reads schedule rows.
///
/// Columns are cleaner id, inspector id, checklist id, area and date. An
/// empty table yields an empty list.
///
/// # Arguments
///
/// * `content` - The raw file content
/// * `format` - The file format
/// * `today` - Stamped as `created_at` on every record
///
/// # Errors
///
/// Returns `IngestionError::WrongColumnCount` if any row does not have
/// exactly five cells, or an error if the table cannot be read.
pub fn parse_schedule_rows(
    content: &[u8],
    format: TabularFormat,
    today: Date,
) -> Result<Vec<ScheduleRecord>, IngestionError> {
    let records: Vec<ScheduleRecord> = read_rows(content, format)?
        .iter()
        .map(|row| {
            let found: usize = row.cells.len();
            if found != SCHEDULE_COLUMNS {
                warn!(row = row.number, found, "Schedule row has wrong column count");
                return Err(IngestionError::WrongColumnCount {
                    row: row.number,
                    expected: SCHEDULE_COLUMNS,
                    found,
                });
            }

            Ok(ScheduleRecord {
                row: row.number,
                cleaner_id: row.cell(0),
                inspector_id: row.cell(1),
                checklist_id: row.cell(2),
                area: row.cell(3),
                date: row.cell(4),
                created_at: today,
                status: InspectionStatus::Planned,
                updated_at: None,
            })
        })
        .collect::<Result<_, IngestionError>>()?;

    debug!(rows = records.len(), "Parsed schedule rows");
    Ok(records)
}

/// The checklist name for an uploaded file: its name without extension.
#[must_use]
pub fn checklist_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or(file_name)
        .trim()
        .to_string()
}

/// Parses an uploaded checklist file into a checklist for `area`.
///
/// Items get orders 1, 2, ... in row order, type tag "A" and no mark.
///
/// # Errors
///
/// Returns `IngestionError::EmptyChecklist` if no item remains after
/// dropping blank cells, or an error if the table cannot be read.
pub fn checklist_from_upload(
    file_name: &str,
    area: AreaCode,
    content: &[u8],
    format: TabularFormat,
) -> Result<NewChecklist, IngestionError> {
    let descriptions: Vec<String> = parse_checklist_rows(content, format)?;
    if descriptions.is_empty() {
        warn!(file_name, "Checklist upload has no items");
        return Err(IngestionError::EmptyChecklist);
    }

    Ok(NewChecklist::from_descriptions(
        &checklist_name(file_name),
        area,
        &descriptions,
    ))
}

/// Parses and converts an uploaded schedule file.
///
/// # Arguments
///
/// * `content` - The raw file content
/// * `format` - The file format
/// * `now` - Creation time for every entry
///
/// # Errors
///
/// Returns the first row failure. No partial list is ever returned.
pub fn schedule_from_upload(
    content: &[u8],
    format: TabularFormat,
    now: OffsetDateTime,
) -> Result<Vec<ActiveInspection>, IngestionError> {
    parse_schedule_rows(content, format, now.date())?
        .iter()
        .map(|record| record.to_active_inspection(now))
        .collect()
}
