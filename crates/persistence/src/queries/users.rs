// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::str::FromStr;
use tracing::debug;

use cleaning_bot_domain::{Role, User, UserId};

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {
/// Returns true if the chat user is registered.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn user_exists(conn: &mut _, user_id: UserId) -> Result<bool, PersistenceError> {
    Ok(users::table
        .find(user_id)
        .select(users::user_id)
        .first::<i64>(conn)
        .optional()?
        .is_some())
}
}

backend_fn! {
/// Retrieves a registered user.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user is not registered, or
/// `PersistenceError::Domain` if the stored role is not recognized.
pub fn get_user(conn: &mut _, user_id: UserId) -> Result<User, PersistenceError> {
    debug!(user_id, "Looking up user");

    users::table
        .find(user_id)
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("user {user_id}")))
        .and_then(User::try_from)
}
}

backend_fn! {
/// Retrieves only the role of a registered user.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user is not registered, or
/// `PersistenceError::Domain` if the stored role is not recognized.
pub fn get_user_role(conn: &mut _, user_id: UserId) -> Result<Role, PersistenceError> {
    let role: String = users::table
        .find(user_id)
        .select(users::role)
        .first::<String>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("user {user_id}")))?;

    Ok(Role::from_str(&role)?)
}
}

backend_fn! {
/// Lists the users holding a role, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users_by_role(conn: &mut _, role: Role) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::role.eq(role.as_str()))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    rows.into_iter().map(User::try_from).collect()
}
}
