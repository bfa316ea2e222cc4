//! Typed failures for catalog operations. Validation variants are raised by
//! the controller before any database call; the remaining variants come out
//! of the store. The `Display` text doubles as the message shown in the
//! status footer, so every variant reads as a complete sentence.

use std::fmt;

use rusqlite::Error as SqlError;
use thiserror::Error;

/// What a field's character rule demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharRule {
    /// Digit characters are rejected (title, author, genre).
    NoDigits,
    /// Only digit characters are accepted (ISBN, year).
    DigitsOnly,
}

impl fmt::Display for CharRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharRule::NoDigits => write!(f, "must not contain numbers"),
            CharRule::DigitsOnly => write!(f, "must contain only numbers"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required form field was left blank.
    #[error("{field} is required.")]
    RequiredFieldMissing { field: &'static str },

    /// A form field contains characters its rule forbids.
    #[error("{field} {rule}.")]
    InvalidCharacters { field: &'static str, rule: CharRule },

    /// The ISBN uniqueness constraint rejected an insert or update.
    #[error("A book with ISBN {isbn} already exists.")]
    ConstraintViolation { isbn: String },

    /// An update or delete matched no row.
    #[error("Book not found.")]
    NotFound,

    /// The storage engine failed for a reason other than a constraint.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] SqlError),
}

impl CatalogError {
    /// Whether the error was raised by input validation, i.e. before the
    /// store was ever contacted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::RequiredFieldMissing { .. } | CatalogError::InvalidCharacters { .. }
        )
    }
}
