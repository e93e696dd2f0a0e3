//! Tag read model.

use serde::{Deserialize, Serialize};

/// A tag as known by the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Display name; unique case-insensitively.
    pub name: String,
    /// User-defined display order, ascending.
    pub index: i64,
}

impl Tag {
    pub fn new(name: impl Into<String>, index: i64) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Normalizes one tag value for storage and lookup.
///
/// Returns `None` for blank input. Case is preserved; comparisons happen
/// case-insensitively in SQL.
pub fn normalize_tag_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
