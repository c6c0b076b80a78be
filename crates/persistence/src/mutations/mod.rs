// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Backend-specific helpers such as `get_last_insert_rowid()` come from the
//! `backend` module through `PersistenceBackend`. Everything else is plain
//! Diesel DSL.

pub mod checklists;
pub mod inspections;
pub mod schedule;
pub mod users;
