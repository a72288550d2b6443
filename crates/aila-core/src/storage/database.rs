//! SQLite-backed key-value storage.
//!
//! The engagement counters, prompt cooldown timestamp, welcome-offer state
//! and referral code all persist as string values in a single `kv` table,
//! one `aila_`-prefixed key per field. The database file is the local
//! mirror that a "log out" flow wipes wholesale; nothing in it is required
//! for correctness of the current session.

use rusqlite::{params, Connection};

use super::{data_dir, KvStore};
use crate::error::StorageError;

/// SQLite database holding the persisted key-value entries.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/aila/aila.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("aila.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    /// Get a value from the key-value store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the key-value store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a value from the key-value store.
    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl KvStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.kv_get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.kv_set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "world").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "world");
    }

    #[test]
    fn test_kv_delete() {
        let db = Database::open_memory().unwrap();
        db.kv_set("gone", "soon").unwrap();
        db.kv_delete("gone").unwrap();
        assert!(db.kv_get("gone").unwrap().is_none());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aila.db");
        let conn = Connection::open(&path).unwrap();
        let db = Database { conn };
        db.migrate().unwrap();
        db.kv_set("k", "v").unwrap();
        assert_eq!(db.kv_get("k").unwrap().unwrap(), "v");
    }
}
