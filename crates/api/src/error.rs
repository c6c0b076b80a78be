// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Every error that reaches this layer is turned into reply text here.
//! Nothing crosses the chat boundary unformatted.

use cleaning_bot::CoreError;
use cleaning_bot_domain::DomainError;
use cleaning_bot_persistence::PersistenceError;

use crate::intake::IngestionError;

/// Access guard errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The sender is not in the user store.
    NotRegistered {
        /// The chat user id of the sender.
        user_id: i64,
    },
    /// The sender's role does not allow the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRegistered { user_id } => {
                write!(f, "User {user_id} is not registered")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and are the
/// only errors rendered to chat users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The sender is not registered.
    NotRegistered {
        /// The chat user id of the sender.
        user_id: i64,
    },
    /// The sender may not perform the action.
    AccessDenied {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An uploaded file could not be ingested. Nothing was written.
    IngestionFailed {
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRegistered { user_id } => write!(f, "User {user_id} is not registered"),
            Self::AccessDenied {
                action,
                required_role,
            } => {
                write!(f, "Access denied: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::IngestionFailed { message } => write!(f, "Ingestion failed: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Renders the text sent back to the chat user.
    ///
    /// Internal details are withheld. They are logged where the error is
    /// produced.
    #[must_use]
    pub fn to_reply(&self) -> String {
        match self {
            Self::NotRegistered { user_id } => format!(
                "👋 You are not registered yet.\n\n\
                 Ask an administrator to add you. Your ID: {user_id}"
            ),
            Self::AccessDenied { .. } => {
                String::from("⛔ You do not have permission for this action.")
            }
            Self::InvalidInput { message, .. } => format!("❌ {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => format!("❌ {resource_type} not found: {message}"),
            Self::IngestionFailed { message } => {
                format!("❌ The file could not be processed: {message}\n\nNothing was saved.")
            }
            Self::Internal { .. } => {
                String::from("⚠️ Something went wrong. Please try again later.")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotRegistered { user_id } => Self::NotRegistered { user_id },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::AccessDenied {
                action,
                required_role,
            },
        }
    }
}

impl From<IngestionError> for ApiError {
    fn from(err: IngestionError) -> Self {
        Self::IngestionFailed {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidFullName { parts } => ApiError::InvalidInput {
            field: String::from("full_name"),
            message: format!(
                "The full name must have exactly three words, but {parts} were given"
            ),
        },
        DomainError::MissingField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("The {field} must not be empty"),
        },
        DomainError::InvalidRole(role) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{role}'"),
        },
        DomainError::InvalidStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown inspection status '{status}'"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DuplicateItemOrder { order } => ApiError::InvalidInput {
            field: String::from("items"),
            message: format!("Two checklist items share order {order}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::UnknownAction(data) => ApiError::InvalidInput {
            field: String::from("action"),
            message: format!("Unknown action '{data}'"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Store and connection failures become `Internal`. Lookup and uniqueness
/// failures keep their meaning.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(key) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: key,
        },
        PersistenceError::DuplicateUser(user_id) => ApiError::InvalidInput {
            field: String::from("user_id"),
            message: format!("User {user_id} is already registered"),
        },
        PersistenceError::DuplicateChecklistId(checklist_id) => ApiError::InvalidInput {
            field: String::from("checklist_id"),
            message: format!("Checklist ID '{checklist_id}' is already scheduled"),
        },
        PersistenceError::Domain(domain_err) => translate_domain_error(domain_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
