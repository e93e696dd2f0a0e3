//! Single-note widget timeline provider.

use super::{demo, hourly_timeline, Timeline};
use crate::repo::note_store::NoteStore;
use crate::service::note_query::NoteQueryService;
use log::{info, warn};

/// One rendered state of the single-note widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteWidgetEntry {
    /// Epoch milliseconds at which the host shows this entry.
    pub date: i64,
    pub title: String,
    pub content: String,
    /// `None` for demo content.
    pub key: Option<String>,
}

impl NoteWidgetEntry {
    fn demo(date: i64) -> Self {
        Self {
            date,
            title: demo::SINGLE_NOTE_TITLE.to_string(),
            content: demo::SINGLE_NOTE_CONTENT.to_string(),
            key: None,
        }
    }
}

/// User configuration of one single-note widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteWidgetConfiguration {
    /// Sync key of the selected note.
    pub note_key: Option<String>,
}

/// Entry shown while the widget is loading.
pub fn placeholder(now: i64) -> NoteWidgetEntry {
    NoteWidgetEntry::demo(now)
}

/// Entry shown in the widget gallery.
pub fn snapshot(now: i64) -> NoteWidgetEntry {
    NoteWidgetEntry::demo(now)
}

/// Builds the hourly timeline for the configured note.
///
/// Returns `None` when no note is configured or the note is no longer
/// available (deleted or unknown key).
pub fn note_timeline<S: NoteStore>(
    service: &NoteQueryService<S>,
    configuration: &NoteWidgetConfiguration,
    now: i64,
) -> Option<Timeline<NoteWidgetEntry>> {
    let Some(key) = configuration
        .note_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
    else {
        warn!("event=note_timeline module=widget status=error error_code=missing_configuration");
        return None;
    };

    let Some(note) = service.note_for_key(key) else {
        info!("event=note_timeline module=widget status=skipped reason=note_not_found");
        return None;
    };

    Some(hourly_timeline(now, |date| NoteWidgetEntry {
        date,
        title: note.title.clone(),
        content: note.body.clone(),
        key: Some(note.key.clone()),
    }))
}
