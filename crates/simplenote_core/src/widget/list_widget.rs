//! Note-list widget timeline provider.

use super::{demo, hourly_timeline, Timeline};
use crate::model::query::TagsFilter;
use crate::repo::note_store::NoteStore;
use crate::service::note_query::NoteQueryService;

/// Widget size class; decides how many rows fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetFamily {
    Small,
    #[default]
    Medium,
    Large,
}

impl WidgetFamily {
    pub fn row_limit(self) -> u32 {
        match self {
            Self::Small | Self::Medium => 3,
            Self::Large => 8,
        }
    }
}

/// One row of the list widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWidgetRow {
    pub key: String,
    pub title: String,
}

/// One rendered state of the list widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWidgetEntry {
    pub date: i64,
    /// Header label; the tag name or `None` for all notes.
    pub tag: Option<String>,
    pub rows: Vec<ListWidgetRow>,
}

/// User configuration of one list widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListWidgetConfiguration {
    pub tag: Option<String>,
    pub family: WidgetFamily,
}

/// Demo entry for loading and gallery states.
pub fn placeholder(now: i64, family: WidgetFamily) -> ListWidgetEntry {
    let limit = family.row_limit() as usize;
    ListWidgetEntry {
        date: now,
        tag: Some(demo::LIST_TAG.to_string()),
        rows: demo::LIST_TITLES
            .iter()
            .take(limit)
            .map(|title| ListWidgetRow {
                key: String::new(),
                title: (*title).to_string(),
            })
            .collect(),
    }
}

/// Builds the hourly timeline for the configured tag (or all notes).
pub fn list_timeline<S: NoteStore>(
    service: &NoteQueryService<S>,
    configuration: &ListWidgetConfiguration,
    now: i64,
) -> Timeline<ListWidgetEntry> {
    let filter = TagsFilter::from_tag(configuration.tag.clone());
    let tag = match &filter {
        TagsFilter::AllNotes => None,
        TagsFilter::Tag(name) => Some(name.clone()),
    };
    let rows: Vec<ListWidgetRow> = service
        .notes(filter, configuration.family.row_limit())
        .into_iter()
        .map(|note| ListWidgetRow {
            key: note.key,
            title: note.title,
        })
        .collect();

    hourly_timeline(now, |date| ListWidgetEntry {
        date,
        tag: tag.clone(),
        rows: rows.clone(),
    })
}
