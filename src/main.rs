//! Binary entry point that glues the SQLite-backed catalog to the TUI: bring
//! up the database, hydrate the initial book list, and drive the Ratatui
//! event loop until the user exits.

use library_catalog_manager::{ensure_schema, fetch_books, run_app, App};

/// Initialize persistence, load the catalog, and launch the event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for
/// example an unwritable data directory) to the terminal instead of crashing
/// silently; failure to open the store is the one error that terminates
/// startup.
fn main() -> anyhow::Result<()> {
    let conn = ensure_schema()?;
    let books = fetch_books(&conn)?;

    let mut app = App::new(conn, books);
    run_app(&mut app)
}
