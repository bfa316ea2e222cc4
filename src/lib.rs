//! Core library surface for the Library Catalog Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces.

pub mod db;
pub mod error;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer, used by `main.rs` to
/// initialize the embedded SQLite store and preload the catalog.
pub use db::{ensure_schema, fetch_books};

/// The failure taxonomy shared by the store and the controller.
pub use error::CatalogError;

/// The domain types other layers manipulate.
pub use models::{Book, BookDraft};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
