//! Read-only note query service for extension surfaces.
//!
//! # Responsibility
//! - Gate access on the shared login state (unless running as a preview).
//! - Build fetch requests (filter, sort, limit) so callers never write raw
//!   queries.
//! - Convert store failures into empty results.
//!
//! # Invariants
//! - Construction fails with `AccessError::AppNotConfigured` when the user is
//!   logged out and the caller is not a preview.
//! - Query methods never return store errors; failures are logged and
//!   surface as empty vectors or `None`.
//! - `limit = 0` is unlimited; otherwise `len <= limit`.

use crate::model::note::Note;
use crate::model::query::{NoteFetchRequest, SortMode, TagsFilter};
use crate::model::tag::Tag;
use crate::repo::note_store::NoteStore;
use crate::repo::RepoResult;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Explicit caller context for query services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryContext {
    /// Shared "user is authenticated" flag.
    pub logged_in: bool,
    /// Ordering applied to every note query.
    pub sort_mode: SortMode,
    /// Previews (widget gallery, tests) skip the login gate.
    pub is_preview: bool,
}

/// Caller is not allowed to read the shared store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// No authenticated user in the main app.
    AppNotConfigured,
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AppNotConfigured => write!(f, "app is not configured: no logged-in user"),
        }
    }
}

impl Error for AccessError {}

/// Filtered, ordered views over the shared note collection.
pub struct NoteQueryService<S: NoteStore> {
    store: S,
    context: QueryContext,
}

impl<S: NoteStore> NoteQueryService<S> {
    /// Creates a query service when `context` permits store access.
    pub fn try_new(store: S, context: QueryContext) -> Result<Self, AccessError> {
        if !context.is_preview && !context.logged_in {
            return Err(AccessError::AppNotConfigured);
        }
        Ok(Self { store, context })
    }

    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    /// Returns notes selected by `filter`, sorted by the context sort mode and
    /// truncated to `limit` (`0` = unlimited).
    pub fn notes(&self, filter: TagsFilter, limit: u32) -> Vec<Note> {
        let request = NoteFetchRequest {
            filter,
            sort: self.context.sort_mode,
            limit,
        };
        recover_empty("notes", self.store.fetch_notes(&request))
    }

    /// Finds a note by sync key among all notes outside the trash.
    pub fn note_for_key(&self, key: &str) -> Option<Note> {
        self.notes(TagsFilter::AllNotes, 0)
            .into_iter()
            .find(|note| note.key == key)
    }

    /// Returns the head of the all-notes list.
    pub fn first_note(&self) -> Option<Note> {
        self.notes(TagsFilter::AllNotes, 1).into_iter().next()
    }

    /// Returns every tag in display order.
    pub fn tags(&self) -> Vec<Tag> {
        recover_empty("tags", self.store.fetch_tags())
    }
}

fn recover_empty<T>(query: &'static str, result: RepoResult<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            error!(
                "event=store_fetch module=query status=error query={query} error_code=fetch_failed error={err}"
            );
            Vec::new()
        }
    }
}
