use rusqlite::{params, Connection, Error as SqlError, ErrorCode};

use crate::error::CatalogError;
use crate::models::{Book, BookDraft};

/// Retrieve every book ordered by id, so the display order matches insertion
/// order. The query doubles as the single source of truth for column order.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>, CatalogError> {
    let mut stmt =
        conn.prepare("SELECT id, title, author, isbn, genre, year FROM books ORDER BY id")?;

    let books = stmt
        .query_map([], row_to_book)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(books)
}

/// Find books whose title or ISBN contains `term` as a substring. SQLite's
/// `LIKE` is case-insensitive for ASCII, which is what the search toggle in
/// the UI expects. The term is not escaped, so `%` and `_` act as wildcards.
pub fn search_books(conn: &Connection, term: &str) -> Result<Vec<Book>, CatalogError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, author, isbn, genre, year FROM books
         WHERE title LIKE ?1 OR isbn LIKE ?1
         ORDER BY id",
    )?;

    let pattern = format!("%{term}%");
    let books = stmt
        .query_map([pattern], row_to_book)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(books)
}

/// Insert a new book row, returning the hydrated struct so the caller can
/// report on it without re-querying the database.
pub fn insert_book(conn: &Connection, draft: &BookDraft) -> Result<Book, CatalogError> {
    conn.execute(
        "INSERT INTO books (title, author, isbn, genre, year) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![draft.title, draft.author, draft.isbn, draft.genre, draft.year],
    )
    .map_err(|err| map_constraint(err, &draft.isbn))?;

    let id = conn.last_insert_rowid();
    Ok(Book {
        id,
        title: draft.title.clone(),
        author: draft.author.clone(),
        isbn: draft.isbn.clone(),
        genre: draft.genre.clone(),
        year: draft.year.clone(),
    })
}

/// Replace every mutable field of the row matching `id`. Surfaces an explicit
/// error when zero rows are touched so the UI can show a friendly message
/// instead of silently continuing.
pub fn update_book(conn: &Connection, id: i64, draft: &BookDraft) -> Result<(), CatalogError> {
    let updated = conn
        .execute(
            "UPDATE books SET title = ?1, author = ?2, isbn = ?3, genre = ?4, year = ?5
             WHERE id = ?6",
            params![draft.title, draft.author, draft.isbn, draft.genre, draft.year, id],
        )
        .map_err(|err| map_constraint(err, &draft.isbn))?;

    if updated == 0 {
        Err(CatalogError::NotFound)
    } else {
        Ok(())
    }
}

/// Remove the row matching `id`, reporting `NotFound` if it was already gone.
pub fn delete_book(conn: &Connection, id: i64) -> Result<(), CatalogError> {
    let deleted = conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;

    if deleted == 0 {
        Err(CatalogError::NotFound)
    } else {
        Ok(())
    }
}

fn row_to_book(row: &rusqlite::Row<'_>) -> Result<Book, SqlError> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        genre: row.get(4)?,
        year: row.get(5)?,
    })
}

/// Coerce SQLite constraint errors into the typed variant. The only
/// constraint on the table beyond NOT NULL is the uniqueness of the ISBN.
fn map_constraint(err: SqlError, isbn: &str) -> CatalogError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        CatalogError::ConstraintViolation {
            isbn: isbn.to_string(),
        }
    } else {
        CatalogError::StorageUnavailable(err)
    }
}
