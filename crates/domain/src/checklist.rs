// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checklists and their items.
//!
//! Items are addressed by their `order` value, never by their position in
//! the item list. Deleting an item shifts the positions of the items after
//! it, but their orders stay the same.

use crate::types::AreaCode;
use time::OffsetDateTime;

/// Store-assigned checklist identifier.
pub type ChecklistId = i64;

/// Category tag given to items ingested without an explicit type.
pub const DEFAULT_ITEM_TYPE: &str = "A";

/// A single line of a checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Category tag, e.g. "A", "B" or "C".
    pub item_type: String,
    /// Addressing key, unique within the checklist.
    pub order: i32,
    /// What the inspector has to check.
    pub description: String,
    /// Whether the item has been checked off.
    pub mark: bool,
}

impl ChecklistItem {
    /// Creates an unmarked item.
    #[must_use]
    pub fn new(item_type: &str, order: i32, description: &str) -> Self {
        Self {
            item_type: item_type.to_string(),
            order,
            description: description.to_string(),
            mark: false,
        }
    }
}

/// A stored checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    pub id: ChecklistId,
    pub name: String,
    pub area: AreaCode,
    /// Items in the order they were stored.
    pub items: Vec<ChecklistItem>,
    pub created_at: OffsetDateTime,
}

impl Checklist {
    /// Finds an item by its order value.
    #[must_use]
    pub fn item(&self, order: i32) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.order == order)
    }

    /// Number of items that have been marked.
    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.items.iter().filter(|item| item.mark).count()
    }
}

/// A checklist that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChecklist {
    pub name: String,
    pub area: AreaCode,
    pub items: Vec<ChecklistItem>,
}

impl NewChecklist {
    /// Builds a checklist from ordered item descriptions.
    ///
    /// Orders start at 1 and follow the description sequence. Every item
    /// gets the default type tag and an unset mark.
    #[must_use]
    pub fn from_descriptions(name: &str, area: AreaCode, descriptions: &[String]) -> Self {
        let items: Vec<ChecklistItem> = descriptions
            .iter()
            .zip(1..)
            .map(|(description, order)| ChecklistItem::new(DEFAULT_ITEM_TYPE, order, description))
            .collect();

        Self {
            name: name.to_string(),
            area,
            items,
        }
    }
}
