// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standalone inspection records.

use crate::types::AreaCode;
use time::Date;

/// Store-assigned inspection identifier.
pub type InspectionId = i64;

/// A problem observed during an inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Stable store-assigned identifier. `None` until the problem is stored.
    pub id: Option<i64>,
    pub description: String,
    /// URL or opaque handle of the photo, if one was attached.
    pub photo_ref: Option<String>,
}

impl Problem {
    /// Creates a problem that has not been stored yet.
    #[must_use]
    pub fn new(description: &str, photo_ref: Option<&str>) -> Self {
        Self {
            id: None,
            description: description.to_string(),
            photo_ref: photo_ref.map(ToString::to_string),
        }
    }
}

/// A stored inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub id: InspectionId,
    pub date: Date,
    pub area: AreaCode,
    pub cleaner_id: String,
    pub inspector_id: String,
    /// Problems in the order they were recorded.
    pub problems: Vec<Problem>,
}

/// An inspection that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInspection {
    pub date: Date,
    pub area: AreaCode,
    pub cleaner_id: String,
    pub inspector_id: String,
    pub problems: Vec<Problem>,
}
