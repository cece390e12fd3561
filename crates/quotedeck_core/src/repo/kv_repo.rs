//! Key-value persistence contracts and implementations.
//!
//! # Responsibility
//! - Model the flat string-keyed storage the quote list persists into.
//! - Provide a durable SQLite backend and an ephemeral in-memory backend.
//!
//! # Invariants
//! - `put` is a whole-value replace; partial writes are not representable.
//! - Keys are fixed constants owned by the store, never user input.

use crate::db::DbResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Flat key-value storage contract.
///
/// Values are serialized text; one fixed key holds the whole quote list, so a
/// write replaces the entire serialized payload atomically.
pub trait KvStore {
    fn get(&self, key: &str) -> DbResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> DbResult<()>;
    fn remove(&self, key: &str) -> DbResult<()>;
}

/// SQLite-backed durable key-value storage.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", params![key])?;
        Ok(())
    }
}

/// Ephemeral in-memory key-value storage.
///
/// Dropped with its owner, which makes it the session-storage analogue for
/// values that must not survive the process. Also convenient in tests.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KvStore, MemoryKvStore, SqliteKvStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_put_get_replace_remove() {
        let conn = open_db_in_memory().unwrap();
        let kv = SqliteKvStore::new(&conn);

        assert_eq!(kv.get("quotes").unwrap(), None);

        kv.put("quotes", "[]").unwrap();
        assert_eq!(kv.get("quotes").unwrap().as_deref(), Some("[]"));

        kv.put("quotes", "[1]").unwrap();
        assert_eq!(kv.get("quotes").unwrap().as_deref(), Some("[1]"));

        kv.remove("quotes").unwrap();
        assert_eq!(kv.get("quotes").unwrap(), None);
    }

    #[test]
    fn memory_store_is_isolated_per_instance() {
        let first = MemoryKvStore::new();
        let second = MemoryKvStore::new();

        first.put("last_quote", "abc").unwrap();
        assert_eq!(first.get("last_quote").unwrap().as_deref(), Some("abc"));
        assert_eq!(second.get("last_quote").unwrap(), None);
    }
}
