//! Task store contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Serialize the full task collection to one JSON blob and back.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - The blob key is `savedTasks` and must not change across versions
//!   without a migration.
//! - An absent blob loads as an empty collection, not an error.
//! - A malformed blob is reported as `StoreError::Decode`; this store never
//!   silently discards data.

use crate::db::DbError;
use crate::model::task::Task;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key for the serialized task collection.
const TASKS_KEY: &str = "savedTasks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for task save/load operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Connection is missing a table required by this store.
    MissingTable(&'static str),
    /// The in-memory collection could not be serialized.
    Encode(serde_json::Error),
    /// The persisted blob exists but does not match the expected shape.
    Decode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingTable(table) => write!(f, "required table is missing: {table}"),
            Self::Encode(err) => write!(f, "failed to encode task collection: {err}"),
            Self::Decode(err) => write!(f, "failed to decode persisted tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingTable(_) => None,
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage interface for the full task collection.
///
/// Both operations work on the whole collection; there is no per-task
/// persistence. Data volume is single-user scale by design.
pub trait TaskStore {
    /// Serializes and stores the full collection, overwriting any prior
    /// value. Not transactional with respect to in-memory state.
    fn save(&self, tasks: &[Task]) -> StoreResult<()>;

    /// Restores the persisted collection. An absent blob yields an empty
    /// collection.
    fn load(&self) -> StoreResult<Vec<Task>>;
}

/// SQLite-backed task store writing one JSON blob into `kv_store`.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Wraps a connection after verifying the backing table exists.
    ///
    /// # Errors
    /// - `StoreError::MissingTable` when the connection has not been
    ///   migrated (see `db::open_db`).
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        if !table_exists(conn, "kv_store")? {
            return Err(StoreError::MissingTable("kv_store"));
        }
        Ok(Self { conn })
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let blob = serde_json::to_vec(tasks).map_err(StoreError::Encode)?;

        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![TASKS_KEY, blob],
        )?;

        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<Task>> {
        let blob: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [TASKS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match blob {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Decode),
            None => Ok(Vec::new()),
        }
    }
}

fn table_exists(conn: &Connection, table_name: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
