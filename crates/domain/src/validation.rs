// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::checklist::ChecklistItem;
use crate::error::DomainError;
use crate::types::NewUser;
use std::collections::HashSet;
use time::Date;
use time::macros::format_description;

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Arguments
///
/// * `value` - The date text, surrounding whitespace is ignored
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the text is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    Date::parse(trimmed, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: trimmed.to_string(),
            error: e.to_string(),
        }
    })
}

/// Validates that no two items share an order value.
///
/// # Errors
///
/// Returns `DomainError::DuplicateItemOrder` with the first repeated order.
pub fn validate_item_orders(items: &[ChecklistItem]) -> Result<(), DomainError> {
    let mut seen: HashSet<i32> = HashSet::new();
    for item in items {
        if !seen.insert(item.order) {
            return Err(DomainError::DuplicateItemOrder { order: item.order });
        }
    }
    Ok(())
}

/// Validates the fields of a registration that are not checked at
/// construction time.
///
/// Uniqueness of the id is a store concern and is not checked here.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the username or team is blank.
pub fn validate_new_user(user: &NewUser) -> Result<(), DomainError> {
    if user.username.trim().is_empty() {
        return Err(DomainError::MissingField("username"));
    }
    if user.team.trim().is_empty() {
        return Err(DomainError::MissingField("team"));
    }
    Ok(())
}
