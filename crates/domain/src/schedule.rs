// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The schedule aggregate: active inspections and free inspectors.

use crate::error::DomainError;
use crate::types::AreaCode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Lifecycle status of an active inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    /// Scheduled but not yet performed.
    Planned,
    /// Performed by the inspector.
    Completed,
}

impl InspectionStatus {
    /// Returns the stored string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for InspectionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scheduled inspection tied to a checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveInspection {
    pub date: Date,
    pub area: AreaCode,
    pub cleaner_id: String,
    /// May be unassigned.
    pub inspector_id: Option<String>,
    /// Addressing key for status changes and removal.
    pub checklist_id: String,
    pub status: InspectionStatus,
    pub created_at: OffsetDateTime,
    /// Unset until the first status change.
    pub updated_at: Option<OffsetDateTime>,
}

/// Restricts a listing of active inspections to one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    Area(AreaCode),
    Status(InspectionStatus),
    Inspector(String),
    Cleaner(String),
}

impl ActiveFilter {
    /// Returns true if the entry satisfies this filter.
    #[must_use]
    pub fn matches(&self, entry: &ActiveInspection) -> bool {
        match self {
            Self::Area(area) => entry.area == *area,
            Self::Status(status) => entry.status == *status,
            Self::Inspector(id) => entry.inspector_id.as_deref() == Some(id.as_str()),
            Self::Cleaner(id) => entry.cleaner_id == *id,
        }
    }
}

/// The single schedule document of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Active inspections in insertion order.
    pub active_inspectors: Vec<ActiveInspection>,
    /// Inspector ids without an assignment, deduplicated, insertion ordered.
    pub free_inspectors: Vec<String>,
}

impl Schedule {
    /// Returns the active inspections, optionally filtered.
    #[must_use]
    pub fn list_active(&self, filter: Option<&ActiveFilter>) -> Vec<ActiveInspection> {
        self.active_inspectors
            .iter()
            .filter(|entry| filter.is_none_or(|f| f.matches(entry)))
            .cloned()
            .collect()
    }

    /// Finds the active inspection using the given checklist id.
    #[must_use]
    pub fn find_active(&self, checklist_id: &str) -> Option<&ActiveInspection> {
        self.active_inspectors
            .iter()
            .find(|entry| entry.checklist_id == checklist_id)
    }

    /// Returns true if the inspector is in the free set.
    #[must_use]
    pub fn is_free(&self, inspector_id: &str) -> bool {
        self.free_inspectors.iter().any(|id| id == inspector_id)
    }
}
