// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use cleaning_bot_domain::{NewUser, UserId, validate_new_user};

use crate::data_models::now_timestamp;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {
/// Registers a user.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateUser` if the id is taken, or
/// `PersistenceError::Domain` if a required field is blank.
pub fn insert_user(conn: &mut _, user: &NewUser) -> Result<(), PersistenceError> {
    validate_new_user(user)?;

    let existing: Option<i64> = users::table
        .find(user.id)
        .select(users::user_id)
        .first::<i64>(conn)
        .optional()?;

    if existing.is_some() {
        return Err(PersistenceError::DuplicateUser(user.id));
    }

    let now: String = now_timestamp()?;

    diesel::insert_into(users::table)
        .values((
            users::user_id.eq(user.id),
            users::surname.eq(user.full_name.surname()),
            users::name.eq(user.full_name.name()),
            users::patronymic.eq(user.full_name.patronymic()),
            users::role.eq(user.role.as_str()),
            users::username.eq(&user.username),
            users::team.eq(&user.team),
            users::area.eq(user.area),
            users::created_at.eq(&now),
            users::updated_at.eq(&now),
        ))
        .execute(conn)?;

    info!(user_id = user.id, role = user.role.as_str(), "Registered user");
    Ok(())
}
}

backend_fn! {
/// Deletes a registered user.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user is not registered.
pub fn delete_user(conn: &mut _, user_id: UserId) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(users::table.find(user_id)).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("user {user_id}")));
    }

    info!(user_id, "Deleted user");
    Ok(())
}
}
