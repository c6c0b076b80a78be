// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Chat user identifier. This is the join key between the users table and
/// the chat transport.
pub type UserId = i64;

/// Integer zone code used to scope checklists, inspections and users.
pub type AreaCode = i32;

/// Capability set of a registered user.
///
/// The role decides which menu is presented and which actions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Head of department. Manages users, checklists and schedules.
    Admin,
    /// Inspector. Performs scheduled inspections.
    Checker,
    /// Cleaner. Can only view their own statistics.
    User,
}

impl Role {
    /// Returns the string stored in the users table.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Checker => "checker",
            Self::User => "user",
        }
    }

    /// Human-readable name shown in greetings.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Checker => "Inspector",
            Self::User => "User",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "checker" => Ok(Self::Checker),
            "user" => Ok(Self::User),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A person's full name split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FullName {
    surname: String,
    name: String,
    patronymic: String,
}

impl FullName {
    /// Creates a full name from already separated parts.
    #[must_use]
    pub fn new(surname: &str, name: &str, patronymic: &str) -> Self {
        Self {
            surname: surname.to_string(),
            name: name.to_string(),
            patronymic: patronymic.to_string(),
        }
    }

    /// Parses free text into surname, name and patronymic.
    ///
    /// The text must contain exactly three whitespace-separated words.
    /// Anything else is rejected rather than partially filled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFullName` if the word count is not three.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        match parts.as_slice() {
            [surname, name, patronymic] => Ok(Self::new(surname, name, patronymic)),
            _ => Err(DomainError::InvalidFullName { parts: parts.len() }),
        }
    }

    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn patronymic(&self) -> &str {
        &self.patronymic
    }
}

impl std::fmt::Display for FullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.surname, self.name, self.patronymic)
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// The chat user identifier.
    pub id: UserId,
    /// Surname, name and patronymic.
    pub full_name: FullName,
    /// The capability set of this user.
    pub role: Role,
    /// The chat username.
    pub username: String,
    /// The team the user belongs to.
    pub team: String,
    /// The zone the user is assigned to, if any.
    pub area: Option<AreaCode>,
}

/// Data required to register a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// The chat user identifier.
    pub id: UserId,
    /// Surname, name and patronymic.
    pub full_name: FullName,
    /// The capability set of this user.
    pub role: Role,
    /// The chat username.
    pub username: String,
    /// The team the user belongs to.
    pub team: String,
    /// The zone the user is assigned to, if any.
    pub area: Option<AreaCode>,
}
