//! Storage layer for soultrip.
//!
//! This module provides `SQLite`-based persistent storage for tours, bookings,
//! contact inquiries, website settings and about page content. Each record
//! kind has its own submodule adding methods to [`Storage`].

pub mod about;
pub mod bookings;
pub mod inquiries;
pub mod migrations;
pub mod schema;
pub mod seed;
pub mod settings;
pub mod stats;
pub mod tours;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Storage engine for the website's data.
///
/// Wraps a single `SQLite` connection. Callers that share it across tasks
/// put it behind a mutex (see `web::AppState`).
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then creates or upgrades the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata table cannot be read.
    pub fn schema_version(&self) -> Result<i32> {
        migrations::get_schema_version(&self.conn)
    }

    /// Row counts per content table, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        schema::CONTENT_TABLES
            .iter()
            .map(|table| {
                let count: i64 =
                    self.conn
                        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                            row.get(0)
                        })?;
                Ok((*table, count))
            })
            .collect()
    }

    /// Size of the database file in bytes; zero for in-memory databases.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        }
    }
}

/// Read a text column into a type with a `FromStr` impl, such as a status enum.
pub(crate) fn text_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = Error>,
{
    let text: String = row.get(idx)?;
    text.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

/// Convert a caller-supplied limit to an SQL integer.
pub(crate) fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let storage = Storage::open_in_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_path() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.path(), Path::new(":memory:"));
        assert_eq!(storage.size_bytes(), 0);
    }

    #[test]
    fn test_schema_version() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.schema_version().unwrap(), migrations::CURRENT_VERSION);
    }

    #[test]
    fn test_table_counts_fresh_database() {
        let storage = Storage::open_in_memory().unwrap();
        let counts = storage.table_counts().unwrap();

        assert_eq!(counts.len(), schema::CONTENT_TABLES.len());
        let lookup = |name: &str| counts.iter().find(|(t, _)| *t == name).unwrap().1;
        assert_eq!(lookup("categories"), 5);
        assert_eq!(lookup("tours"), 0);
        assert!(lookup("website_settings") > 0);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let storage = Storage::open_in_memory().unwrap();
        let result = storage.conn.execute(
            "INSERT INTO bookings (tour_id, customer_name, customer_email) VALUES (999, 'a', 'a@b.co')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_open_file_based() {
        let db_path =
            std::env::temp_dir().join(format!("soultrip_test_{}.db", std::process::id()));

        let storage = Storage::open(&db_path).unwrap();
        assert_eq!(storage.path(), db_path);
        assert!(storage.size_bytes() > 0);

        drop(storage);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let nested_path = std::env::temp_dir().join(format!(
            "soultrip_test_{}/nested/db.sqlite",
            std::process::id()
        ));

        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent.parent().unwrap());
        }
    }

    #[test]
    fn test_reopen_keeps_data() {
        let db_path =
            std::env::temp_dir().join(format!("soultrip_reopen_{}.db", std::process::id()));

        {
            let storage = Storage::open(&db_path).unwrap();
            storage.update_setting("site_name", "Reopened").unwrap();
        }
        let storage = Storage::open(&db_path).unwrap();
        assert_eq!(
            storage.get_setting("site_name").unwrap().unwrap().value.as_deref(),
            Some("Reopened")
        );

        drop(storage);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }
}
