//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. These stay light-weight data holders so the persistence and
//! presentation layers can focus on their own concerns.

#[derive(Debug, Clone)]
/// One catalog record as stored in the `books` table.
pub struct Book {
    /// Primary key from the database. Assigned on insert and immutable; the
    /// edit/delete flows bubble it back to the persistence layer.
    pub id: i64,
    /// Book title shown in the table and search results.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Numeric-string identifier, unique across the catalog. Not validated
    /// against real ISBN checksum rules.
    pub isbn: String,
    /// Optional genre label.
    pub genre: String,
    /// Publication year, kept as the digit string the user typed. The column
    /// is TEXT so no round-trip through SQLite's type affinity occurs.
    pub year: String,
}

impl Book {
    /// Compose a `Title (Author)` string for confirmation dialogs and status
    /// messages.
    pub fn display_title(&self) -> String {
        if self.author.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.author)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The validated, id-less field set handed to the store for insert/update.
/// Only `BookForm::parse_inputs` constructs one, so a draft reaching the
/// database has already passed every validation rule.
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub year: String,
}
