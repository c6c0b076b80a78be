// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A full name did not split into exactly three parts.
    InvalidFullName {
        /// The number of whitespace-separated parts that were found.
        parts: usize,
    },
    /// A required field was missing or blank.
    MissingField(&'static str),
    /// A role string did not match any known role.
    InvalidRole(String),
    /// A status string did not match any known inspection status.
    InvalidStatus(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Two checklist items share the same order value.
    DuplicateItemOrder {
        /// The duplicated order value.
        order: i32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFullName { parts } => write!(
                f,
                "Full name must contain exactly three parts (surname, name, patronymic), got {parts}"
            ),
            Self::MissingField(field) => write!(f, "Required field '{field}' is missing"),
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidStatus(status) => write!(f, "Invalid inspection status: {status}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DuplicateItemOrder { order } => {
                write!(f, "Checklist item order {order} is used more than once")
            }
        }
    }
}

impl std::error::Error for DomainError {}
