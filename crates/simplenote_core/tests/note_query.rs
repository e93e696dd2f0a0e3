use rusqlite::Connection;
use simplenote_core::db::open_db_in_memory;
use simplenote_core::{
    AccessError, Note, NoteQueryService, QueryContext, RepoError, SortMode, SqliteNoteRepository,
    SqliteNoteStore, Tag, TagsFilter,
};

fn note(key: &str, content: &str, created: i64, modified: i64) -> Note {
    Note::from_content(key, content, created, modified)
}

fn tagged(mut note: Note, tags: &[&str]) -> Note {
    note.tags = tags.iter().map(|tag| tag.to_string()).collect();
    note
}

fn trashed(mut note: Note) -> Note {
    note.deleted = true;
    note
}

fn seeded_conn() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        repo.upsert_tag(&Tag::new("work", 1)).unwrap();
        repo.upsert_tag(&Tag::new("Personal", 0)).unwrap();
        for note in [
            tagged(note("k-banana", "banana bread\nflour", 100, 400), &["Personal"]),
            tagged(note("k-apple", "Apple pie\n- [ ] apples", 200, 300), &["work"]),
            note("k-cherry", "cherry list", 300, 200),
            trashed(tagged(note("k-trash", "Trashed note", 400, 500), &["work"])),
        ] {
            repo.upsert_note(&note).unwrap();
        }
    }
    conn
}

fn context(sort_mode: SortMode) -> QueryContext {
    QueryContext {
        logged_in: true,
        sort_mode,
        is_preview: false,
    }
}

fn keys(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|note| note.key.as_str()).collect()
}

#[test]
fn all_notes_excludes_trash_and_sorts_by_modification_newest() {
    let conn = seeded_conn();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let service = NoteQueryService::try_new(store, context(SortMode::ModifiedNewest)).unwrap();

    let notes = service.notes(TagsFilter::AllNotes, 0);
    assert_eq!(keys(&notes), vec!["k-banana", "k-apple", "k-cherry"]);
    assert!(notes.iter().all(|note| !note.deleted));
}

#[test]
fn sort_modes_follow_context() {
    let conn = seeded_conn();
    let cases = [
        (
            SortMode::AlphabeticallyAscending,
            vec!["k-apple", "k-banana", "k-cherry"],
        ),
        (
            SortMode::AlphabeticallyDescending,
            vec!["k-cherry", "k-banana", "k-apple"],
        ),
        (SortMode::CreatedNewest, vec!["k-cherry", "k-apple", "k-banana"]),
        (SortMode::CreatedOldest, vec!["k-banana", "k-apple", "k-cherry"]),
        (SortMode::ModifiedOldest, vec!["k-cherry", "k-apple", "k-banana"]),
    ];
    for (sort_mode, expected) in cases {
        let store = SqliteNoteStore::try_new(&conn).unwrap();
        let service = NoteQueryService::try_new(store, context(sort_mode)).unwrap();
        let notes = service.notes(TagsFilter::AllNotes, 0);
        assert_eq!(keys(&notes), expected, "sort mode {sort_mode:?}");
    }
}

#[test]
fn limit_truncates_after_sorting() {
    let conn = seeded_conn();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let service = NoteQueryService::try_new(store, context(SortMode::ModifiedNewest)).unwrap();

    for limit in 1..=5 {
        assert!(service.notes(TagsFilter::AllNotes, limit).len() <= limit as usize);
    }
    assert_eq!(keys(&service.notes(TagsFilter::AllNotes, 2)), vec!["k-banana", "k-apple"]);
    assert_eq!(service.first_note().unwrap().key, "k-banana");
}

#[test]
fn tag_filter_matches_case_insensitively_and_includes_trash() {
    let conn = seeded_conn();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let service = NoteQueryService::try_new(store, context(SortMode::ModifiedNewest)).unwrap();

    let work = service.notes(TagsFilter::Tag("WORK".to_string()), 0);
    assert_eq!(keys(&work), vec!["k-trash", "k-apple"]);

    let none = service.notes(TagsFilter::Tag("travel".to_string()), 0);
    assert!(none.is_empty());
}

#[test]
fn note_for_key_finds_active_notes_only() {
    let conn = seeded_conn();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let service = NoteQueryService::try_new(store, context(SortMode::ModifiedNewest)).unwrap();

    let apple = service.note_for_key("k-apple").unwrap();
    assert_eq!(apple.title, "Apple pie");
    assert_eq!(apple.body, "- [ ] apples");
    assert_eq!(apple.tags, vec!["work".to_string()]);

    assert!(service.note_for_key("k-trash").is_none());
    assert!(service.note_for_key("does-not-exist").is_none());
}

#[test]
fn tags_are_listed_in_display_order() {
    let conn = seeded_conn();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let service = NoteQueryService::try_new(store, context(SortMode::ModifiedNewest)).unwrap();

    let names: Vec<String> = service.tags().into_iter().map(|tag| tag.name).collect();
    assert_eq!(names, vec!["Personal".to_string(), "work".to_string()]);
}

#[test]
fn logged_out_non_preview_access_is_rejected() {
    let conn = seeded_conn();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let result = NoteQueryService::try_new(store, QueryContext::default());
    assert!(matches!(result, Err(AccessError::AppNotConfigured)));

    let preview = QueryContext {
        is_preview: true,
        ..QueryContext::default()
    };
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let service = NoteQueryService::try_new(store, preview).unwrap();
    assert_eq!(service.notes(TagsFilter::AllNotes, 0).len(), 3);
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteNoteStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("notes")));
}

#[test]
fn upsert_replaces_content_and_tags() {
    let mut conn = seeded_conn();
    {
        let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        let updated = tagged(note("k-apple", "Apple crumble", 200, 900), &["Baking", "baking"]);
        repo.upsert_note(&updated).unwrap();
        repo.set_note_deleted("k-cherry", true).unwrap();
    }

    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let service = NoteQueryService::try_new(store, context(SortMode::ModifiedNewest)).unwrap();
    let notes = service.notes(TagsFilter::AllNotes, 0);
    assert_eq!(keys(&notes), vec!["k-apple", "k-banana"]);
    assert_eq!(notes[0].title, "Apple crumble");
    assert_eq!(notes[0].tags, vec!["Baking".to_string()]);

    let tag_names: Vec<String> = service.tags().into_iter().map(|tag| tag.name).collect();
    assert_eq!(tag_names.last().map(String::as_str), Some("Baking"));
}

#[test]
fn writer_reports_missing_notes_and_blank_input() {
    let mut conn = seeded_conn();
    let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();

    let err = repo.set_note_deleted("nope", true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(key) if key == "nope"));

    let err = repo
        .set_note_tags("nope", &["work".to_string()])
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = repo.upsert_note(&note("  ", "blank key", 1, 1)).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));

    let err = repo
        .set_note_tags("k-apple", &["   ".to_string()])
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
