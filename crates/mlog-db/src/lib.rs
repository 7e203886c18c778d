//! Storage layer for the meal log.
//!
//! Persists the journal as JSON values in a `SQLite` key/value table using
//! `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! # Schema
//!
//! A single `kv` table maps a logical key to a JSON document:
//!
//! | key              | value                                  |
//! |------------------|----------------------------------------|
//! | `meal_logs`      | array of log entries                   |
//! | `meal_comments`  | object of `date -> comment`            |
//! | `meal_goals`     | object of `category -> target`         |
//! | `meal_extracted` | object of `date -> [canonical food]`   |
//!
//! ## Fault Tolerance
//!
//! Stored values are never trusted. A value that is not JSON, or that does
//! not match the expected shape, is logged and replaced by its default when
//! loaded. Only `SQLite` failures are reported as errors.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use mlog_core::{ExtractionTracker, GoalMap, Journal};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Key holding the log entry list.
pub const LOGS_KEY: &str = "meal_logs";
/// Key holding comments by date.
pub const COMMENTS_KEY: &str = "meal_comments";
/// Key holding the goal map.
pub const GOALS_KEY: &str = "meal_goals";
/// Key holding extracted food sets by date.
pub const EXTRACTED_KEY: &str = "meal_extracted";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A value could not be encoded for storage.
    #[error("failed to encode value for {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- kv: one JSON document per logical key
            -- updated_at: ISO 8601 format (e.g., '2025-10-15T10:30:00Z')
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the JSON value stored under `key`.
    ///
    /// A stored value that is not valid JSON is reported as absent.
    pub fn get(&self, key: &str) -> Result<Option<Value>, DbError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is not valid JSON, ignoring");
                Ok(None)
            }
        }
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: &Value) -> Result<(), DbError> {
        put(&self.conn, key, &value.to_string())
    }

    /// Loads and decodes `key`, falling back to `T::default()` when the key is
    /// missing or its value has the wrong shape.
    pub fn load_or_default<T>(&self, key: &str) -> Result<T, DbError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(value) = self.get(key)? else {
            return Ok(T::default());
        };
        Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "stored value has unexpected shape, using default");
            T::default()
        }))
    }

    /// Loads the whole journal. Never fails on bad stored data.
    pub fn load_journal(&self) -> Result<Journal, DbError> {
        let journal = Journal {
            entries: self.load_or_default(LOGS_KEY)?,
            extracted: self.load_or_default::<ExtractionTracker>(EXTRACTED_KEY)?,
            comments: self.load_or_default(COMMENTS_KEY)?,
            goals: self.load_or_default::<GoalMap>(GOALS_KEY)?,
        };
        tracing::debug!(entries = journal.entries.len(), "loaded journal");
        Ok(journal)
    }

    /// Saves every part of the journal in one transaction.
    pub fn save_journal(&mut self, journal: &Journal) -> Result<(), DbError> {
        let logs = encode(LOGS_KEY, &journal.entries)?;
        let extracted = encode(EXTRACTED_KEY, &journal.extracted)?;
        let comments = encode(COMMENTS_KEY, &journal.comments)?;
        let goals = encode(GOALS_KEY, &journal.goals)?;

        let tx = self.conn.transaction()?;
        put(&tx, LOGS_KEY, &logs)?;
        put(&tx, EXTRACTED_KEY, &extracted)?;
        put(&tx, COMMENTS_KEY, &comments)?;
        put(&tx, GOALS_KEY, &goals)?;
        tx.commit()?;
        tracing::debug!(entries = journal.entries.len(), "saved journal");
        Ok(())
    }

    /// Lists stored keys with their last update time, ordered by key.
    pub fn list_keys(&self) -> Result<Vec<(String, String)>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, updated_at FROM kv ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, DbError> {
        let raw = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(raw)
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|source| DbError::Encode {
        key: key.to_string(),
        source,
    })
}

fn put(conn: &Connection, key: &str, value: &str) -> Result<(), DbError> {
    conn.execute(
        "
        INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        ",
        params![key, value, now_timestamp()],
    )?;
    Ok(())
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
