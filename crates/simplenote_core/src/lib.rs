//! Core domain logic for Simplenote extensions.
//!
//! Checklist recognition over note text, and read-only note/tag queries over
//! the shared store used by widget and intents surfaces.

pub mod config;
pub mod db;
pub mod intents;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod text;
pub mod widget;

pub use config::{ConfigError, StorageSettings, WidgetDefaults};
pub use intents::{handler_for, IntentHandler, IntentKind, IntentOption, IntentResponse};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteKey};
pub use model::query::{NoteFetchRequest, SortMode, TagsFilter};
pub use model::tag::Tag;
pub use repo::note_repo::SqliteNoteRepository;
pub use repo::note_store::{NoteStore, SqliteNoteStore};
pub use repo::{RepoError, RepoResult};
pub use service::note_query::{AccessError, NoteQueryService, QueryContext};
pub use text::checklist::{
    find_checklists_anywhere, find_line_anchored_checklists, summarize_checklists,
    ChecklistMatch, ChecklistSummary,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
