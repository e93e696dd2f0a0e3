//! System intents dispatch and handlers.
//!
//! # Responsibility
//! - Map host intent identifiers onto a closed set of intent kinds.
//! - Resolve each kind to its handler by pattern match.
//! - Answer widget configuration option lookups and "open" requests.
//!
//! # Invariants
//! - Unknown identifiers resolve to `IntentHandler::Extension`.
//! - Handlers only read through `NoteQueryService`.

use crate::model::query::TagsFilter;
use crate::repo::note_store::NoteStore;
use crate::service::note_query::NoteQueryService;

const DEEP_LINK_NEW_NOTE: &str = "simplenote://new";
const DEEP_LINK_NOTE_PREFIX: &str = "simplenote://note/";
const ALL_NOTES_DISPLAY: &str = "All Notes";

/// Intents the extension knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    NoteWidget,
    ListWidget,
    OpenNewNote,
    OpenNote,
}

impl IntentKind {
    /// Host-side identifier of the intent definition.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::NoteWidget => "NoteWidgetIntent",
            Self::ListWidget => "ListWidgetIntent",
            Self::OpenNewNote => "OpenNewNoteIntent",
            Self::OpenNote => "OpenNoteIntent",
        }
    }

    /// Parses a host identifier; `None` for intents this extension ignores.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        [
            Self::NoteWidget,
            Self::ListWidget,
            Self::OpenNewNote,
            Self::OpenNote,
        ]
        .into_iter()
        .find(|kind| kind.identifier() == identifier.trim())
    }
}

/// Handler resolved for one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentHandler {
    NoteWidget(NoteWidgetIntentHandler),
    ListWidget(ListWidgetIntentHandler),
    OpenNewNote(OpenNewNoteIntentHandler),
    OpenNote(OpenNoteIntentHandler),
    /// The extension itself answers (default behavior).
    Extension,
}

impl IntentHandler {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoteWidget(_) => "note_widget",
            Self::ListWidget(_) => "list_widget",
            Self::OpenNewNote(_) => "open_new_note",
            Self::OpenNote(_) => "open_note",
            Self::Extension => "extension",
        }
    }
}

/// Resolves the handler for an intent kind.
pub fn handler_for(kind: Option<IntentKind>) -> IntentHandler {
    match kind {
        Some(IntentKind::NoteWidget) => IntentHandler::NoteWidget(NoteWidgetIntentHandler),
        Some(IntentKind::ListWidget) => IntentHandler::ListWidget(ListWidgetIntentHandler),
        Some(IntentKind::OpenNewNote) => IntentHandler::OpenNewNote(OpenNewNoteIntentHandler),
        Some(IntentKind::OpenNote) => IntentHandler::OpenNote(OpenNoteIntentHandler),
        None => IntentHandler::Extension,
    }
}

/// One selectable value in a widget configuration picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentOption {
    /// `None` stands for "all notes" in tag pickers.
    pub identifier: Option<String>,
    pub display: String,
}

/// Outcome of an "open" intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentResponse {
    /// Host should launch the app at `url`.
    ContinueInApp { url: String },
    Failure,
}

/// Supplies note choices for the single-note widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteWidgetIntentHandler;

impl NoteWidgetIntentHandler {
    pub fn note_options<S: NoteStore>(&self, service: &NoteQueryService<S>) -> Vec<IntentOption> {
        service
            .notes(TagsFilter::AllNotes, 0)
            .into_iter()
            .map(|note| IntentOption {
                identifier: Some(note.key),
                display: note.title,
            })
            .collect()
    }
}

/// Supplies tag choices for the list widget, "All Notes" first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListWidgetIntentHandler;

impl ListWidgetIntentHandler {
    pub fn tag_options<S: NoteStore>(&self, service: &NoteQueryService<S>) -> Vec<IntentOption> {
        let all_notes = IntentOption {
            identifier: None,
            display: ALL_NOTES_DISPLAY.to_string(),
        };
        std::iter::once(all_notes)
            .chain(service.tags().into_iter().map(|tag| IntentOption {
                identifier: Some(tag.name.clone()),
                display: tag.name,
            }))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenNewNoteIntentHandler;

impl OpenNewNoteIntentHandler {
    pub fn handle(&self) -> IntentResponse {
        IntentResponse::ContinueInApp {
            url: DEEP_LINK_NEW_NOTE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenNoteIntentHandler;

impl OpenNoteIntentHandler {
    /// Opens the note with `key`; fails when it is missing or trashed.
    pub fn handle<S: NoteStore>(&self, service: &NoteQueryService<S>, key: &str) -> IntentResponse {
        match service.note_for_key(key) {
            Some(note) => IntentResponse::ContinueInApp {
                url: format!("{DEEP_LINK_NOTE_PREFIX}{}", note.key),
            },
            None => IntentResponse::Failure,
        }
    }
}
