// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every function exists as a `_sqlite` and a `_mysql` monomorph generated
//! by `backend_fn!`. The `Persistence` adapter in `lib.rs` picks one based
//! on the active connection.

pub mod checklists;
pub mod inspections;
pub mod schedule;
pub mod users;
