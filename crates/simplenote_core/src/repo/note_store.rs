//! Read-only note/tag store contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate a `NoteFetchRequest` (predicate, sort, limit) into one query.
//! - Load tag associations for every returned note.
//!
//! # Invariants
//! - `TagsFilter::AllNotes` never returns notes with `is_deleted = 1`.
//! - `TagsFilter::Tag` matches tag names case-insensitively and does not
//!   consider the trash flag.
//! - `limit = 0` means unlimited.
//! - Tags are ordered by `display_index ASC, name ASC`.

use crate::model::note::{split_title_and_body, Note};
use crate::model::query::{NoteFetchRequest, TagsFilter};
use crate::model::tag::Tag;
use crate::repo::{ensure_store_ready, int_to_bool, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    key,
    content,
    pinned,
    is_deleted,
    creation_date,
    modification_date
FROM notes";

/// Fetch contract for the shared persistent store.
pub trait NoteStore {
    /// Returns notes selected, ordered and truncated per `request`.
    fn fetch_notes(&self, request: &NoteFetchRequest) -> RepoResult<Vec<Note>>;
    /// Returns every tag in display order.
    fn fetch_tags(&self) -> RepoResult<Vec<Tag>>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn fetch_notes(&self, request: &NoteFetchRequest) -> RepoResult<Vec<Note>> {
        (**self).fetch_notes(request)
    }

    fn fetch_tags(&self) -> RepoResult<Vec<Tag>> {
        (**self).fetch_tags()
    }
}

/// SQLite-backed read store.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store from a migrated (or verified read-only) connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn fetch_notes(&self, request: &NoteFetchRequest) -> RepoResult<Vec<Note>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE ");
        let mut bind_values: Vec<Value> = Vec::new();

        match &request.filter {
            TagsFilter::AllNotes => sql.push_str("is_deleted = 0"),
            TagsFilter::Tag(name) => {
                sql.push_str(
                    "EXISTS (
                        SELECT 1
                        FROM note_tags nt
                        INNER JOIN tags t ON t.id = nt.tag_id
                        WHERE nt.note_key = notes.key
                          AND t.name = ? COLLATE NOCASE
                    )",
                );
                bind_values.push(Value::Text(name.clone()));
            }
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(request.sort.order_by_sql());

        if request.limit > 0 {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(request.limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let mut note = parse_note_row(row)?;
            note.tags = load_tags_for_note(self.conn, note.key.as_str())?;
            notes.push(note);
        }

        Ok(notes)
    }

    fn fetch_tags(&self) -> RepoResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, display_index
             FROM tags
             ORDER BY display_index ASC, name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(Tag {
                name: row.get("name")?,
                index: row.get("display_index")?,
            });
        }
        Ok(tags)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let content: String = row.get("content")?;
    let (title, body) = split_title_and_body(content.as_str());
    Ok(Note {
        key: row.get("key")?,
        title,
        body,
        content,
        pinned: int_to_bool(row.get("pinned")?, "notes.pinned")?,
        deleted: int_to_bool(row.get("is_deleted")?, "notes.is_deleted")?,
        tags: Vec::new(),
        creation_date: row.get("creation_date")?,
        modification_date: row.get("modification_date")?,
    })
}

fn load_tags_for_note(conn: &Connection, note_key: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.name
         FROM note_tags nt
         INNER JOIN tags t ON t.id = nt.tag_id
         WHERE nt.note_key = ?1
         ORDER BY t.display_index ASC, t.name COLLATE NOCASE ASC;",
    )?;
    let mut rows = stmt.query([note_key])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(row.get(0)?);
    }
    Ok(tags)
}
