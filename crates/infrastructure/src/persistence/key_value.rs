//! Key-value JSON store
//!
//! The storage contract the mobile client was written against: typed
//! `get`/`set`/`remove` of JSON documents under string keys.

use rusqlite::{OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::persistence::connection::{ConnectionPool, DatabaseError};

/// Typed key-value store over the sqlite `kv_store` table
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    pool: ConnectionPool,
}

impl KeyValueStore {
    /// Create a store over an initialized pool
    #[must_use]
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Read and deserialize the value under a key
    ///
    /// Returns `None` when the key does not exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DatabaseError> {
        let conn = self.pool.get()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serialize and write a value under a key, replacing any old value
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), DatabaseError> {
        let json = serde_json::to_string(value)?;
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, json],
        )?;
        debug!(%key, bytes = json.len(), "stored value");
        Ok(())
    }

    /// Delete the value under a key; returns whether it existed
    pub fn remove(&self, key: &str) -> Result<bool, DatabaseError> {
        let conn = self.pool.get()?;
        let affected = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::persistence::connection::create_pool;

    fn store() -> KeyValueStore {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
        };
        KeyValueStore::new(create_pool(&config).expect("pool"))
    }

    #[test]
    fn get_missing_key_is_none() {
        let kv = store();
        let value: Option<Vec<String>> = kv.get("absent").expect("get");
        assert!(value.is_none());
    }

    #[test]
    fn set_then_get_roundtrips() {
        let kv = store();
        kv.set("names", &vec!["ana".to_string(), "bia".to_string()])
            .expect("set");
        let value: Option<Vec<String>> = kv.get("names").expect("get");
        assert_eq!(value, Some(vec!["ana".to_string(), "bia".to_string()]));
    }

    #[test]
    fn set_replaces_the_old_value() {
        let kv = store();
        kv.set("counter", &1u32).expect("set");
        kv.set("counter", &2u32).expect("set");
        let value: Option<u32> = kv.get("counter").expect("get");
        assert_eq!(value, Some(2));
    }

    #[test]
    fn remove_reports_existence() {
        let kv = store();
        kv.set("ephemeral", &true).expect("set");
        assert!(kv.remove("ephemeral").expect("remove"));
        assert!(!kv.remove("ephemeral").expect("remove"));
    }
}
