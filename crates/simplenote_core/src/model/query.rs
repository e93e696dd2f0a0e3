//! Transient query parameters for note fetches.

use serde::{Deserialize, Serialize};

/// Note selection predicate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagsFilter {
    /// Every note outside the trash.
    #[default]
    AllNotes,
    /// Notes carrying the named tag (case-insensitive).
    Tag(String),
}

impl TagsFilter {
    /// `None` (or a blank name) selects all notes.
    pub fn from_tag(tag: Option<String>) -> Self {
        match tag {
            Some(name) if !name.trim().is_empty() => Self::Tag(name.trim().to_string()),
            _ => Self::AllNotes,
        }
    }
}

/// Ordering applied to note lists.
///
/// Mirrors the user's list sort preference shared with extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    AlphabeticallyAscending,
    AlphabeticallyDescending,
    CreatedNewest,
    CreatedOldest,
    #[default]
    ModifiedNewest,
    ModifiedOldest,
}

impl SortMode {
    /// SQL `ORDER BY` clause body for the `notes` table.
    ///
    /// `key ASC` is appended as a stable tie-breaker.
    pub(crate) fn order_by_sql(self) -> &'static str {
        match self {
            Self::AlphabeticallyAscending => "content COLLATE NOCASE ASC, key ASC",
            Self::AlphabeticallyDescending => "content COLLATE NOCASE DESC, key ASC",
            Self::CreatedNewest => "creation_date DESC, key ASC",
            Self::CreatedOldest => "creation_date ASC, key ASC",
            Self::ModifiedNewest => "modification_date DESC, key ASC",
            Self::ModifiedOldest => "modification_date ASC, key ASC",
        }
    }
}

/// Full fetch request issued against a note store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteFetchRequest {
    pub filter: TagsFilter,
    pub sort: SortMode,
    /// Maximum rows; `0` means unlimited.
    pub limit: u32,
}
