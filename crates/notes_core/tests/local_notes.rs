use notes_core::repo::kv_store::{KvStore, SqliteKvStore};
use notes_core::repo::note_store::{LocalNoteStore, NOTES_KEY};
use notes_core::{open_db, open_db_in_memory, LocalNote, RepoError};
use rusqlite::Connection;

#[test]
fn notes_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local.db");
    let note = LocalNote::new("Call plumber", "before Friday");

    {
        let conn = open_db(&path).unwrap();
        let store = LocalNoteStore::new(SqliteKvStore::try_new(&conn).unwrap());
        store.save_note(&note).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = LocalNoteStore::new(SqliteKvStore::try_new(&conn).unwrap());
    assert_eq!(store.load_notes().unwrap(), vec![note]);
}

#[test]
fn notes_are_stored_as_one_json_array() {
    let conn = open_db_in_memory().unwrap();
    let store = LocalNoteStore::new(SqliteKvStore::try_new(&conn).unwrap());
    let first = LocalNote::new("One", "");
    let second = LocalNote::new("Two", "body");
    store.save_note(&first).unwrap();
    store.save_note(&second).unwrap();

    let raw = SqliteKvStore::try_new(&conn)
        .unwrap()
        .get(NOTES_KEY)
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], first.id.as_str());
    assert_eq!(items[1]["body"], "body");
}

#[test]
fn update_and_delete_follow_store_contract() {
    let conn = open_db_in_memory().unwrap();
    let store = LocalNoteStore::new(SqliteKvStore::try_new(&conn).unwrap());
    let mut note = LocalNote::new("Draft", "");
    store.save_note(&note).unwrap();

    note.title = "Final".to_string();
    store.update_note(&note).unwrap();
    assert_eq!(store.get_note(&note.id).unwrap().unwrap().title, "Final");

    assert!(store.delete_note(&note.id).unwrap());
    assert!(matches!(
        store.update_note(&note),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn kv_store_requires_migrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteKvStore::try_new(&conn),
        Err(RepoError::InvalidData(_))
    ));
}
