//! Use-case API for widget and intents extension hosts.
//!
//! # Responsibility
//! - Expose sync, use-case-level functions through FRB.
//! - Open the shared store read-only and apply shared login/sort defaults.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Store and access failures surface as empty results plus a diagnostic
//!   message, never as errors.

use simplenote_core::db::open_db_read_only;
use simplenote_core::intents::{handler_for, IntentHandler, IntentKind, IntentResponse};
use simplenote_core::widget::list_widget::{
    list_timeline, ListWidgetConfiguration, ListWidgetEntry, WidgetFamily,
};
use simplenote_core::widget::note_widget::{
    note_timeline, NoteWidgetConfiguration, NoteWidgetEntry,
};
use simplenote_core::widget::now_epoch_ms;
use simplenote_core::{
    core_version as core_version_inner, find_checklists_anywhere, find_line_anchored_checklists,
    init_logging as init_logging_inner, ChecklistMatch, IntentOption, NoteQueryService,
    SqliteNoteStore, StorageSettings, WidgetDefaults,
};
use std::sync::OnceLock;

static SHARED_STORAGE: OnceLock<StorageSettings> = OnceLock::new();

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per extension process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One checklist marker, as byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub start: usize,
    pub end: usize,
    pub checked: bool,
}

/// Finds checklist markers in `text`.
///
/// `anywhere = false` only reports markers opening a line.
#[flutter_rust_bridge::frb(sync)]
pub fn find_checklists(text: String, anywhere: bool) -> Vec<ChecklistItem> {
    let matches = if anywhere {
        find_checklists_anywhere(text.as_str())
    } else {
        find_line_anchored_checklists(text.as_str())
    };
    matches.into_iter().map(to_checklist_item).collect()
}

/// Single-note widget timeline envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTimelineResponse {
    /// Empty when the note is unavailable or access is denied.
    pub entries: Vec<NoteWidgetEntry>,
    pub message: String,
}

/// Builds the single-note widget timeline from the shared store.
#[flutter_rust_bridge::frb(sync)]
pub fn widget_note_timeline(note_key: Option<String>, is_preview: bool) -> NoteTimelineResponse {
    let configuration = NoteWidgetConfiguration { note_key };
    let result = with_query_service(is_preview, |service| {
        note_timeline(service, &configuration, now_epoch_ms())
    });
    match result {
        Ok(Some(timeline)) => NoteTimelineResponse {
            entries: timeline.entries,
            message: String::new(),
        },
        Ok(None) => NoteTimelineResponse {
            entries: Vec::new(),
            message: "Note unavailable.".to_string(),
        },
        Err(err) => NoteTimelineResponse {
            entries: Vec::new(),
            message: format!("widget_note_timeline failed: {err}"),
        },
    }
}

/// List widget timeline envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTimelineResponse {
    pub entries: Vec<ListWidgetEntry>,
    pub message: String,
}

/// Builds the list widget timeline for `tag` (or all notes).
#[flutter_rust_bridge::frb(sync)]
pub fn widget_list_timeline(
    tag: Option<String>,
    large: bool,
    is_preview: bool,
) -> ListTimelineResponse {
    let configuration = ListWidgetConfiguration {
        tag,
        family: if large {
            WidgetFamily::Large
        } else {
            WidgetFamily::Medium
        },
    };
    match with_query_service(is_preview, |service| {
        list_timeline(service, &configuration, now_epoch_ms())
    }) {
        Ok(timeline) => ListTimelineResponse {
            entries: timeline.entries,
            message: String::new(),
        },
        Err(err) => ListTimelineResponse {
            entries: Vec::new(),
            message: format!("widget_list_timeline failed: {err}"),
        },
    }
}

/// Resolves the handler name for a host intent identifier.
///
/// Unknown identifiers resolve to `extension`.
#[flutter_rust_bridge::frb(sync)]
pub fn intent_handler_name(identifier: String) -> String {
    handler_for(IntentKind::from_identifier(identifier.as_str()))
        .name()
        .to_string()
}

/// Lists configuration options for the widget intent `identifier`.
///
/// Returns an empty list for intents without options or on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn intent_options(identifier: String) -> Vec<IntentOption> {
    let handler = handler_for(IntentKind::from_identifier(identifier.as_str()));
    with_query_service(false, |service| match handler {
        IntentHandler::NoteWidget(handler) => handler.note_options(service),
        IntentHandler::ListWidget(handler) => handler.tag_options(service),
        IntentHandler::OpenNewNote(_) | IntentHandler::OpenNote(_) | IntentHandler::Extension => {
            Vec::new()
        }
    })
    .unwrap_or_else(|err| {
        log::warn!("event=intent_options module=ffi status=error error={err}");
        Vec::new()
    })
}

/// Handles an "open" intent; returns the deep link or an empty string.
#[flutter_rust_bridge::frb(sync)]
pub fn intent_open(identifier: String, note_key: Option<String>) -> String {
    let response = match handler_for(IntentKind::from_identifier(identifier.as_str())) {
        IntentHandler::OpenNewNote(handler) => Ok(handler.handle()),
        IntentHandler::OpenNote(handler) => with_query_service(false, |service| {
            handler.handle(service, note_key.as_deref().unwrap_or_default())
        }),
        _ => Ok(IntentResponse::Failure),
    };
    match response {
        Ok(IntentResponse::ContinueInApp { url }) => url,
        Ok(IntentResponse::Failure) => String::new(),
        Err(err) => {
            log::warn!("event=intent_open module=ffi status=error error={err}");
            String::new()
        }
    }
}

fn shared_storage() -> &'static StorageSettings {
    SHARED_STORAGE.get_or_init(StorageSettings::from_env)
}

fn with_query_service<T>(
    is_preview: bool,
    f: impl FnOnce(&NoteQueryService<SqliteNoteStore<'_>>) -> T,
) -> Result<T, String> {
    let settings = shared_storage();
    let context = WidgetDefaults::load(settings).query_context(is_preview);
    let conn = open_db_read_only(settings.shared_db_path())
        .map_err(|err| format!("shared store open failed: {err}"))?;
    let store =
        SqliteNoteStore::try_new(&conn).map_err(|err| format!("shared store not ready: {err}"))?;
    let service = NoteQueryService::try_new(store, context).map_err(|err| err.to_string())?;
    Ok(f(&service))
}

fn to_checklist_item(item: ChecklistMatch) -> ChecklistItem {
    ChecklistItem {
        start: item.range.start,
        end: item.range.end,
        checked: item.checked,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, find_checklists, init_logging, intent_handler_name, intent_open,
        intent_options, shared_storage, widget_list_timeline, widget_note_timeline,
    };
    use simplenote_core::db::open_db;
    use simplenote_core::{Note, SqliteNoteRepository, WidgetDefaults};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn find_checklists_switches_policy() {
        let text = "- [ ] Buy avocados - []".to_string();
        let anchored = find_checklists(text.clone(), false);
        assert_eq!(anchored.len(), 1);
        assert_eq!((anchored[0].start, anchored[0].end), (0, 5));
        assert_eq!(find_checklists(text, true).len(), 2);
    }

    #[test]
    fn intent_handler_name_falls_back_to_extension() {
        assert_eq!(intent_handler_name("NoteWidgetIntent".to_string()), "note_widget");
        assert_eq!(intent_handler_name("Unknown".to_string()), "extension");
        assert_eq!(
            intent_open("OpenNewNoteIntent".to_string(), None),
            "simplenote://new"
        );
    }

    #[test]
    fn widget_calls_read_seeded_shared_store() {
        let settings = shared_storage();
        let key = unique_token("ffi-note");
        std::fs::create_dir_all(settings.shared_storage_dir()).expect("create shared dir");
        {
            let mut conn = open_db(settings.shared_db_path()).expect("open shared db");
            let mut repo = SqliteNoteRepository::try_new(&mut conn).expect("writer");
            let mut note = Note::from_content(
                key.clone(),
                "Shared title\nshared body",
                1,
                i64::MAX / 2,
            );
            note.tags = vec![key.clone()];
            repo.upsert_note(&note).expect("seed note");
        }
        WidgetDefaults {
            logged_in: true,
            ..WidgetDefaults::default()
        }
        .save(settings)
        .expect("save defaults");

        let timeline = widget_note_timeline(Some(key.clone()), false);
        assert_eq!(timeline.entries.len(), 6, "{}", timeline.message);
        assert_eq!(timeline.entries[0].title, "Shared title");

        let list = widget_list_timeline(Some(key.clone()), false, false);
        assert_eq!(list.entries[0].rows.len(), 1, "{}", list.message);

        let options = intent_options("ListWidgetIntent".to_string());
        assert!(options
            .iter()
            .any(|option| option.identifier.as_deref() == Some(key.as_str())));

        assert_eq!(
            intent_open("OpenNoteIntent".to_string(), Some(key.clone())),
            format!("simplenote://note/{key}")
        );
        assert!(intent_open("OpenNoteIntent".to_string(), None).is_empty());
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
