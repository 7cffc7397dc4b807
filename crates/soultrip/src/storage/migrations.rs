//! Database migration system for soultrip.
//!
//! This module handles database schema versioning and migrations. Reference
//! data the site cannot run without (tour categories and the default website
//! settings) is installed by the first migration.

use rusqlite::{params, Connection};
use tracing::info;

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;
use super::settings::DEFAULT_SETTINGS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Tour categories installed on a fresh database.
pub const DEFAULT_CATEGORIES: &[(i64, &str, &str)] = &[
    (1, "ADVENTURE", "Thrilling adventures for adrenaline seekers"),
    (2, "CULTURAL", "Immersive cultural experiences and heritage tours"),
    (3, "WILDLIFE", "Wildlife safaris and nature encounters"),
    (4, "NATURE", "Natural wonders and eco-tourism"),
    (5, "CLASSIC", "Classic destinations and timeless experiences"),
];

/// Initialize the database schema.
///
/// Creates all tables and indexes if they don't exist, then runs any
/// pending migrations to bring the schema up to the current version.
///
/// # Errors
///
/// Returns an error if schema creation or migration fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = get_schema_version(conn)?;
    if version < CURRENT_VERSION {
        run_migrations(conn, version)?;
    }

    Ok(())
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (fresh database).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let result: std::result::Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM metadata WHERE key = ?1",
        [VERSION_KEY],
        |row| row.get(0),
    );

    match result {
        Ok(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

fn run_migrations(conn: &Connection, from_version: i32) -> Result<()> {
    let mut current = from_version;

    while current < CURRENT_VERSION {
        current += 1;
        info!("Running database migration to version {}", current);
        run_migration(conn, current)?;
    }

    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(Error::DatabaseMigration {
            message: format!("unknown migration version: {version}"),
        }),
    }
}

/// Migration to version 1: install reference data.
///
/// Inserts are `OR IGNORE` so a database that already carries the rows (or an
/// edited copy of them) is left untouched.
fn migrate_v1(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    for (id, name, description) in DEFAULT_CATEGORIES {
        tx.execute(
            "INSERT OR IGNORE INTO categories (id, name, description) VALUES (?1, ?2, ?3)",
            params![id, name, description],
        )?;
    }

    for setting in DEFAULT_SETTINGS {
        tx.execute(
            r"
            INSERT OR IGNORE INTO website_settings
                (setting_key, setting_value, setting_type, category, display_name, description, sort_order)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                setting.key,
                setting.value,
                setting.kind.as_str(),
                setting.category,
                setting.display_name,
                setting.description,
                setting.sort_order,
            ],
        )?;
    }

    tx.commit()?;
    set_schema_version(conn, 1)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_db() -> Connection {
        Connection::open_in_memory().expect("failed to create in-memory database")
    }

    fn count(conn: &Connection, sql: &str) -> i64 {
        conn.query_row(sql, [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn test_initialize_schema_creates_tables() {
        let conn = create_test_db();
        initialize_schema(&conn).expect("failed to initialize schema");

        for table in super::super::schema::CONTENT_TABLES {
            let n = count(
                &conn,
                &format!(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='{table}'"
                ),
            );
            assert_eq!(n, 1, "table {table} missing");
        }
    }

    #[test]
    fn test_initialize_schema_sets_version() {
        let conn = create_test_db();
        initialize_schema(&conn).expect("failed to initialize schema");

        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let conn = create_test_db();

        initialize_schema(&conn).expect("first init failed");
        initialize_schema(&conn).expect("second init failed");

        assert_eq!(count(&conn, "SELECT COUNT(*) FROM categories"), 5);
    }

    #[test]
    fn test_reference_data_installed() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();

        let adventure: String = conn
            .query_row("SELECT name FROM categories WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(adventure, "ADVENTURE");

        let settings = count(&conn, "SELECT COUNT(*) FROM website_settings");
        assert_eq!(settings, i64::try_from(DEFAULT_SETTINGS.len()).unwrap());
    }

    #[test]
    fn test_migration_keeps_edited_settings() {
        let conn = create_test_db();
        for statement in SCHEMA_STATEMENTS {
            conn.execute(statement, []).unwrap();
        }
        conn.execute(
            "INSERT INTO website_settings (setting_key, setting_value) VALUES ('site_name', 'Custom')",
            [],
        )
        .unwrap();

        initialize_schema(&conn).unwrap();

        let name: String = conn
            .query_row(
                "SELECT setting_value FROM website_settings WHERE setting_key = 'site_name'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "Custom");
    }

    #[test]
    fn test_get_schema_version_fresh_db() {
        let conn = create_test_db();
        conn.execute(
            "CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_set_and_get_schema_version() {
        let conn = create_test_db();
        conn.execute(
            "CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .unwrap();

        set_schema_version(&conn, 42).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 42);
    }

    #[test]
    fn test_run_migration_unknown_version() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();

        let err = run_migration(&conn, 999).unwrap_err();
        assert!(err.to_string().contains("unknown migration version"));
    }

    #[test]
    fn test_indexes_created() {
        let conn = create_test_db();
        initialize_schema(&conn).expect("failed to initialize schema");

        let indexes: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(std::result::Result::ok)
            .collect();

        assert!(indexes.iter().any(|n| n == "idx_tours_status"));
        assert!(indexes.iter().any(|n| n == "idx_bookings_tour"));
    }
}
