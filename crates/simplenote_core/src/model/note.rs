//! Note read model.
//!
//! # Invariants
//! - `key` is unique within the store and never reused.
//! - `title` and `body` are derived from `content`, never stored.

use serde::{Deserialize, Serialize};

/// Stable sync identifier of a note.
pub type NoteKey = String;

/// Canonical note record as read from the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable sync key.
    pub key: NoteKey,
    /// Raw note text. The first non-blank line is the title.
    pub content: String,
    /// First non-blank line of `content`, trimmed.
    pub title: String,
    /// Remaining text after the title line, leading whitespace removed.
    pub body: String,
    pub pinned: bool,
    /// Trash flag.
    pub deleted: bool,
    /// Tag names in display order.
    pub tags: Vec<String>,
    /// Epoch milliseconds.
    pub creation_date: i64,
    /// Epoch milliseconds.
    pub modification_date: i64,
}

impl Note {
    /// Builds a note and derives `title` / `body` from `content`.
    pub fn from_content(
        key: impl Into<NoteKey>,
        content: impl Into<String>,
        creation_date: i64,
        modification_date: i64,
    ) -> Self {
        let content = content.into();
        let (title, body) = split_title_and_body(content.as_str());
        Self {
            key: key.into(),
            content,
            title,
            body,
            pinned: false,
            deleted: false,
            tags: Vec::new(),
            creation_date,
            modification_date,
        }
    }

    /// Whether this note is outside the trash.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

/// Splits raw content into `(title, body)`.
///
/// Rules:
/// - leading blank lines are skipped;
/// - the title is the first remaining line, trimmed;
/// - the body is everything after that line with leading whitespace removed
///   and trailing whitespace trimmed.
pub fn split_title_and_body(content: &str) -> (String, String) {
    let trimmed = content.trim_start();
    match trimmed.split_once('\n') {
        Some((first, rest)) => (first.trim().to_string(), rest.trim().to_string()),
        None => (trimmed.trim_end().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::{split_title_and_body, Note};

    #[test]
    fn split_uses_first_non_blank_line_as_title() {
        let (title, body) = split_title_and_body("\n\n  Groceries \n\n- [ ] milk\n- [x] eggs\n");
        assert_eq!(title, "Groceries");
        assert_eq!(body, "- [ ] milk\n- [x] eggs");
    }

    #[test]
    fn split_single_line_has_empty_body() {
        let (title, body) = split_title_and_body("only a title");
        assert_eq!(title, "only a title");
        assert!(body.is_empty());
    }

    #[test]
    fn split_handles_crlf_line_endings() {
        let (title, body) = split_title_and_body("Title\r\nBody");
        assert_eq!(title, "Title");
        assert_eq!(body, "Body");
    }

    #[test]
    fn from_content_starts_active_and_unpinned() {
        let note = Note::from_content("k1", "Hello\nworld", 1, 2);
        assert!(note.is_active());
        assert!(!note.pinned);
        assert_eq!(note.title, "Hello");
        assert_eq!(note.body, "world");
    }
}
