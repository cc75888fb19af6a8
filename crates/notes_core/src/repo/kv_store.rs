//! String key-value store backed by the `kv_entries` table.
//!
//! # Invariants
//! - `put` replaces the whole value for a key.
//! - Keys are compared exactly (case-sensitive).

use super::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_entries";

/// Minimal persistent key-value contract.
pub trait KvStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes `key`; returns whether it existed.
    fn remove(&self, key: &str) -> RepoResult<bool>;
}

/// SQLite-backed key-value store.
#[derive(Debug)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a migrated connection; fails when the schema is missing.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [KV_TABLE],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::InvalidData(format!(
                "required table `{KV_TABLE}` is missing; open the database with `open_db`"
            )));
        }
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{KvStore, SqliteKvStore};
    use crate::db::open_db_in_memory;
    use crate::repo::RepoError;
    use rusqlite::Connection;

    #[test]
    fn put_get_replace_and_remove() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKvStore::try_new(&conn).unwrap();

        assert_eq!(store.get("theme").unwrap(), None);
        store.put("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.put("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));

        assert!(store.remove("theme").unwrap());
        assert!(!store.remove("theme").unwrap());
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn unmigrated_connection_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKvStore::try_new(&conn).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }
}
