// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access guard for chat senders.
//!
//! Every sender must be a registered user. The stored role then decides
//! which actions the sender may take.

use tracing::{debug, warn};

use cleaning_bot::Action;
use cleaning_bot_domain::{ActiveInspection, Role, User, UserId};
use cleaning_bot_persistence::{Persistence, PersistenceError};

use crate::error::{ApiError, AuthError, translate_persistence_error};

/// Resolves chat senders to registered users.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Looks up the sender in the user store.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `user_id` - The chat user id of the sender
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotRegistered` if the sender is unknown, or a
    /// translated store error if the lookup fails.
    pub fn resolve_sender(
        persistence: &mut Persistence,
        user_id: UserId,
    ) -> Result<User, ApiError> {
        match persistence.get_user(user_id) {
            Ok(user) => {
                debug!(user_id, role = user.role.as_str(), "Resolved sender");
                Ok(user)
            }
            Err(PersistenceError::NotFound(_)) => {
                warn!(user_id, "Rejected unregistered sender");
                Err(AuthError::NotRegistered { user_id }.into())
            }
            Err(e) => Err(translate_persistence_error(e)),
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a user may trigger an action.
    ///
    /// Admin menus and flows are reserved for admins. Everything else is
    /// open to every registered user and narrowed later by what the user
    /// owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the action requires the admin role and the user
    /// does not have it.
    pub fn authorize_action(user: &User, action: &Action) -> Result<(), AuthError> {
        if action.requires_admin() && user.role != Role::Admin {
            warn!(
                user_id = user.id,
                action = %action.callback_data(),
                "Denied admin action"
            );
            return Err(AuthError::Unauthorized {
                action: action.callback_data(),
                required_role: String::from(Role::Admin.display_name()),
            });
        }
        Ok(())
    }

    /// Checks if a user may complete an active inspection.
    ///
    /// The assigned inspector and admins may complete it.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is neither.
    pub fn authorize_complete(user: &User, entry: &ActiveInspection) -> Result<(), AuthError> {
        let own_id: String = user.id.to_string();
        if user.role == Role::Admin || entry.inspector_id.as_deref() == Some(own_id.as_str()) {
            return Ok(());
        }

        warn!(
            user_id = user.id,
            checklist_id = %entry.checklist_id,
            "Denied completing an inspection assigned to someone else"
        );
        Err(AuthError::Unauthorized {
            action: String::from("complete"),
            required_role: String::from(Role::Checker.display_name()),
        })
    }
}
