// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod checklist;
mod error;
mod inspection;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use checklist::{Checklist, ChecklistId, ChecklistItem, DEFAULT_ITEM_TYPE, NewChecklist};
pub use error::DomainError;
pub use inspection::{Inspection, InspectionId, NewInspection, Problem};
pub use schedule::{ActiveFilter, ActiveInspection, InspectionStatus, Schedule};
pub use types::{AreaCode, FullName, NewUser, Role, User, UserId};
pub use validation::{parse_date, validate_item_orders, validate_new_user};
