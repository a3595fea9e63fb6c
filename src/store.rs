//! User record store.
//!
//! A single `users` table in an embedded SQLite file:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS users (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     username TEXT NOT NULL,
//!     email TEXT
//! )
//! ```
//!
//! [`RecordStore::ensure_schema`] is idempotent: calling it any number of
//! times leaves exactly one table. [`RecordStore::seed_fixtures`] appends the
//! fixture rows unconditionally; there is no uniqueness constraint on
//! `username`, so seeding twice duplicates the pairs. That is accepted
//! behavior, not a bug, and the tests pin it down.
//!
//! The store opens its own connection and releases it when dropped, on both
//! success and failure paths. Concurrent CLI invocations against the same
//! database file are unsynchronized; SQLite's own file locking is the only
//! protection.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database parent directory does not exist: {0}")]
    ParentMissing(PathBuf),
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT
)";

/// Fixture rows appended by `seed_fixtures`, in insertion order.
const SEED_USERS: &[(&str, Option<&str>)] = &[
    ("Alice", Some("alice@example.com")),
    ("Bob", Some("bob@example.com")),
];

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

/// Handle to the user database. Wraps one connection for one invocation.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open the database at `path`, creating the file on first use.
    ///
    /// The parent directory must already exist; sitekit never creates it.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(StoreError::ParentMissing(parent.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Create the `users` table if it does not exist. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(CREATE_USERS_TABLE, [])?;
        Ok(())
    }

    /// Append the fixture rows and return how many were inserted.
    ///
    /// Always inserts — repeated calls duplicate the fixtures. Fails if the
    /// table does not exist yet (`db migrate` first).
    pub fn seed_fixtures(&self) -> Result<usize, StoreError> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO users (username, email) VALUES (?1, ?2)")?;
        for (username, email) in SEED_USERS {
            stmt.execute(rusqlite::params![username, email])?;
        }
        Ok(SEED_USERS.len())
    }

    /// Number of rows in `users`.
    pub fn user_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All user rows ordered by id.
    pub fn users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, email FROM users ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
            })
        })?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }
}
