//! Widget timeline builders.
//!
//! # Responsibility
//! - Turn note query results into timeline entries a widget host renders.
//! - Provide placeholder/snapshot content that never touches the store.
//!
//! # Invariants
//! - Timelines hold `TIMELINE_ENTRY_COUNT` entries spaced one hour apart,
//!   starting at the caller-provided `now`.
//! - Timelines always reload at the end.

pub mod list_widget;
pub mod note_widget;

/// Number of hourly entries per timeline.
pub const TIMELINE_ENTRY_COUNT: usize = 6;
/// One hour in epoch milliseconds.
pub const HOUR_MS: i64 = 60 * 60 * 1000;

/// Demo note used for placeholders, snapshots and widget gallery previews.
pub mod demo {
    pub const SINGLE_NOTE_TITLE: &str = "Welcome to Simplenote";
    pub const SINGLE_NOTE_CONTENT: &str =
        "To use this widget, open the widget settings and choose a note.";
    pub const LIST_TAG: &str = "All Notes";
    pub const LIST_TITLES: &[&str] = &["Welcome to Simplenote", "Groceries", "Ideas"];
}

/// When the host should ask for a new timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// After the last entry's date passes.
    AtEnd,
}

/// Entries plus reload policy handed to the widget host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<E> {
    pub entries: Vec<E>,
    pub policy: ReloadPolicy,
}

/// Builds an hourly timeline, calling `make` with each slot date.
pub(crate) fn hourly_timeline<E>(now: i64, mut make: impl FnMut(i64) -> E) -> Timeline<E> {
    let entries = (0..TIMELINE_ENTRY_COUNT as i64)
        .map(|hour| make(now.saturating_add(hour * HOUR_MS)))
        .collect();
    Timeline {
        entries,
        policy: ReloadPolicy::AtEnd,
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
