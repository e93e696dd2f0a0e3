//! Sync-ingest writer for the shared note store.
//!
//! # Responsibility
//! - Apply note and tag records delivered by sync (or user edits in the app).
//! - Own tag-link replacement with atomic semantics.
//!
//! # Invariants
//! - `upsert_note` writes the row and its full tag set in one transaction.
//! - Tags referenced by a note are created on demand and appended to the
//!   end of the display order.
//! - Blank note keys and blank tag names are rejected.

use crate::model::note::Note;
use crate::model::tag::{normalize_tag_name, Tag};
use crate::repo::{bool_to_int, ensure_store_ready, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// SQLite-backed writer for notes and tags.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a writer from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_store_ready(conn)?;
        Ok(Self { conn })
    }

    /// Inserts or replaces one note, including its tag set.
    pub fn upsert_note(&mut self, note: &Note) -> RepoResult<()> {
        if note.key.trim().is_empty() {
            return Err(RepoError::InvalidData("note key cannot be blank".to_string()));
        }
        let tags = normalize_tag_list(&note.tags)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO notes (
                key,
                content,
                pinned,
                is_deleted,
                creation_date,
                modification_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(key) DO UPDATE SET
                content = excluded.content,
                pinned = excluded.pinned,
                is_deleted = excluded.is_deleted,
                creation_date = excluded.creation_date,
                modification_date = excluded.modification_date;",
            params![
                note.key.as_str(),
                note.content.as_str(),
                bool_to_int(note.pinned),
                bool_to_int(note.deleted),
                note.creation_date,
                note.modification_date,
            ],
        )?;
        replace_tags_in_tx(&tx, note.key.as_str(), &tags)?;
        tx.commit()?;

        debug!(
            "event=note_upsert module=repo status=ok tag_count={}",
            tags.len()
        );
        Ok(())
    }

    /// Replaces all tags for one note in a single transaction.
    pub fn set_note_tags(&mut self, key: &str, tags: &[String]) -> RepoResult<()> {
        let tags = normalize_tag_list(tags)?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !note_exists_in_tx(&tx, key)? {
            return Err(RepoError::NotFound(key.to_string()));
        }
        replace_tags_in_tx(&tx, key, &tags)?;
        tx.commit()?;
        Ok(())
    }

    /// Moves a note into (or out of) the trash.
    pub fn set_note_deleted(&mut self, key: &str, deleted: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes SET is_deleted = ?2 WHERE key = ?1;",
            params![key, bool_to_int(deleted)],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(key.to_string()));
        }
        Ok(())
    }

    /// Inserts a tag or updates the display order of an existing one.
    pub fn upsert_tag(&mut self, tag: &Tag) -> RepoResult<()> {
        let name = normalize_tag_name(tag.name.as_str())
            .ok_or_else(|| RepoError::InvalidData("tag name cannot be blank".to_string()))?;
        self.conn.execute(
            "INSERT INTO tags (name, display_index) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET display_index = excluded.display_index;",
            params![name, tag.index],
        )?;
        Ok(())
    }
}

fn normalize_tag_list(tags: &[String]) -> RepoResult<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let name = normalize_tag_name(tag)
            .ok_or_else(|| RepoError::InvalidData(format!("invalid tag name `{tag}`")))?;
        if !normalized
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(name.as_str()))
        {
            normalized.push(name);
        }
    }
    Ok(normalized)
}

fn replace_tags_in_tx(tx: &Transaction<'_>, key: &str, tags: &[String]) -> RepoResult<()> {
    tx.execute("DELETE FROM note_tags WHERE note_key = ?1;", [key])?;

    for tag in tags {
        tx.execute(
            "INSERT OR IGNORE INTO tags (name, display_index)
             SELECT ?1, COALESCE(MAX(display_index) + 1, 0)
             FROM tags;",
            [tag.as_str()],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO note_tags (note_key, tag_id)
             SELECT ?1, id
             FROM tags
             WHERE name = ?2 COLLATE NOCASE;",
            params![key, tag.as_str()],
        )?;
    }
    Ok(())
}

fn note_exists_in_tx(tx: &Transaction<'_>, key: &str) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM notes WHERE key = ?1);",
        [key],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
