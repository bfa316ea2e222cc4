use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

use crate::error::CatalogError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-catalog-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "catalog.sqlite";

/// Ensure the database file exists in the default location, create the
/// schema, and return a live connection. Called once at startup; any failure
/// here is fatal to the process.
pub fn ensure_schema() -> Result<Connection> {
    ensure_schema_at(&db_path()?)
}

/// Same as [`ensure_schema`] against an explicit path. Tests point this at a
/// temporary directory instead of the user's home.
pub fn ensure_schema_at(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(db_path).context("failed to open SQLite database")?;
    initialize(&conn).context("failed to create books table")?;

    Ok(conn)
}

/// Create the `books` table if absent. Idempotent, so every startup runs it.
/// Title, author, and ISBN are required; the ISBN carries the uniqueness
/// constraint the store enforces on insert and update.
pub fn initialize(conn: &Connection) -> Result<(), CatalogError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            isbn TEXT NOT NULL UNIQUE,
            genre TEXT,
            year TEXT
        )",
        [],
    )?;
    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs =
        directories::BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fetch_books, insert_book};
    use crate::models::BookDraft;

    #[test]
    fn creates_parent_directories_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.sqlite");

        let conn = ensure_schema_at(&path).unwrap();
        assert!(path.exists());
        assert!(fetch_books(&conn).unwrap().is_empty());
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.sqlite");

        let conn = ensure_schema_at(&path).unwrap();
        insert_book(
            &conn,
            &BookDraft {
                title: "Dune".into(),
                author: "Herbert".into(),
                isbn: "9780441013593".into(),
                genre: "SciFi".into(),
                year: "1965".into(),
            },
        )
        .unwrap();
        drop(conn);

        let conn = ensure_schema_at(&path).unwrap();
        let books = fetch_books(&conn).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
    }
}
