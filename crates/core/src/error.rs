// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while interpreting chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Callback data did not name a known action.
    UnknownAction(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAction(data) => write!(f, "Unknown action: {data}"),
        }
    }
}

impl std::error::Error for CoreError {}
