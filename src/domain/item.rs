use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of an item, unique within a collection
///
/// Persisted as a bare JSON number so slots written by older builds
/// (millisecond timestamps) load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Assigned at creation, never changes
    pub id: ItemId,
    /// Non-empty, stored trimmed
    pub title: String,
    /// Completion flag
    pub is_done: bool,
}

impl Item {
    /// Create a fresh, not-yet-done item
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            is_done: false,
        }
    }

    /// Copy of this item with title and completion replaced (id kept)
    pub fn replaced(&self, title: impl Into<String>, is_done: bool) -> Self {
        Self {
            id: self.id,
            title: title.into(),
            is_done,
        }
    }

    /// Whether the title satisfies the non-empty invariant
    pub fn has_valid_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Trim user input into a title, rejecting blank text
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
