use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::{CatalogError, CharRule};
use crate::models::{Book, BookDraft};

/// Internal representation of the book form fields. The same form backs both
/// the add and edit flows, so the validation in `parse_inputs` is identical
/// for both.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) isbn: String,
    pub(crate) genre: String,
    pub(crate) year: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Isbn,
    Genre,
    Year,
}

impl BookField {
    pub(crate) const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Isbn,
        BookField::Genre,
        BookField::Year,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Isbn => "ISBN",
            BookField::Genre => "Genre",
            BookField::Year => "Year",
        }
    }

    pub(crate) fn index(self) -> usize {
        BookField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

impl BookForm {
    /// Populate the form from an existing book when entering edit mode. This
    /// is the "row picked" transition: every field of the row is copied into
    /// the form.
    pub(crate) fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.clone(),
            year: book.year.clone(),
            active: BookField::Title,
            error: None,
        }
    }

    /// Cycle focus forward across the five fields.
    pub(crate) fn next_field(&mut self) {
        let idx = self.active.index();
        self.active = BookField::ALL[(idx + 1) % BookField::ALL.len()];
    }

    /// Cycle focus backward.
    pub(crate) fn prev_field(&mut self) {
        let idx = self.active.index();
        self.active = BookField::ALL[(idx + BookField::ALL.len() - 1) % BookField::ALL.len()];
    }

    /// Append a character to the active field. Control characters are
    /// ignored; everything else is accepted here and judged by
    /// `parse_inputs` on save, so typing a letter into the ISBN field gets a
    /// validation message rather than being silently dropped.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.field_mut(self.active).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.field_mut(self.active).pop();
    }

    /// Reset all five inputs to empty. Focus and any pending edit target are
    /// left alone.
    pub(crate) fn clear_fields(&mut self) {
        for field in BookField::ALL {
            self.field_mut(field).clear();
        }
        self.error = None;
    }

    /// Validate the inputs and return a draft ready for persistence. Rules
    /// run in a fixed order and the first violation aborts the save:
    /// required fields, then the no-digits fields, then the digits-only
    /// fields.
    pub(crate) fn parse_inputs(&self) -> Result<BookDraft, CatalogError> {
        let title = self.title.trim();
        let author = self.author.trim();
        let isbn = self.isbn.trim();
        let genre = self.genre.trim();
        let year = self.year.trim();

        for (field, value) in [("Title", title), ("Author", author), ("ISBN", isbn)] {
            if value.is_empty() {
                return Err(CatalogError::RequiredFieldMissing { field });
            }
        }

        for (field, value) in [("Title", title), ("Author", author), ("Genre", genre)] {
            if value.chars().any(|ch| ch.is_ascii_digit()) {
                return Err(CatalogError::InvalidCharacters {
                    field,
                    rule: CharRule::NoDigits,
                });
            }
        }

        if isbn.chars().any(|ch| ch.is_alphabetic()) {
            return Err(CatalogError::InvalidCharacters {
                field: "ISBN",
                rule: CharRule::DigitsOnly,
            });
        }

        if year.is_empty() || !year.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(CatalogError::InvalidCharacters {
                field: "Year",
                rule: CharRule::DigitsOnly,
            });
        }

        Ok(BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            genre: genre.to_string(),
            year: year.to_string(),
        })
    }

    /// Render a styled line for the modal form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let value = self.field_ref(field);
        let is_active = self.active == field;

        let placeholder = match field {
            BookField::Genre => "<optional>",
            _ => "<required>",
        };

        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.field_ref(field).chars().count()
    }

    fn field_ref(&self, field: BookField) -> &String {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Isbn => &self.isbn,
            BookField::Genre => &self.genre,
            BookField::Year => &self.year,
        }
    }

    fn field_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Isbn => &mut self.isbn,
            BookField::Genre => &mut self.genre,
            BookField::Year => &mut self.year,
        }
    }
}

/// Snapshot of the book being considered for deletion, so the dialog keeps
/// showing it even if the list refreshes underneath.
pub(crate) struct ConfirmDelete {
    pub(crate) book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BookForm {
        BookForm {
            title: "Dune".into(),
            author: "Herbert".into(),
            isbn: "9780441013593".into(),
            genre: "SciFi".into(),
            year: "1965".into(),
            ..BookForm::default()
        }
    }

    #[test]
    fn valid_inputs_parse_into_a_draft() {
        let draft = valid_form().parse_inputs().unwrap();
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.year, "1965");
    }

    #[test]
    fn inputs_are_trimmed() {
        let mut form = valid_form();
        form.title = "  Dune  ".into();
        form.year = " 1965 ".into();
        let draft = form.parse_inputs().unwrap();
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.year, "1965");
    }

    #[test]
    fn missing_required_field_is_reported_first() {
        let mut form = valid_form();
        form.author.clear();
        form.isbn = "12ab".into();
        let err = form.parse_inputs().unwrap_err();
        assert!(
            matches!(err, CatalogError::RequiredFieldMissing { field } if field == "Author")
        );
    }

    #[test]
    fn digit_in_title_is_rejected() {
        let mut form = valid_form();
        form.title = "Book1".into();
        let err = form.parse_inputs().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCharacters {
                field: "Title",
                rule: CharRule::NoDigits,
            }
        ));
    }

    #[test]
    fn digit_in_genre_is_rejected_but_empty_genre_is_fine() {
        let mut form = valid_form();
        form.genre = "Sci4i".into();
        assert!(form.parse_inputs().is_err());

        form.genre.clear();
        assert!(form.parse_inputs().is_ok());
    }

    #[test]
    fn alphabetic_isbn_is_rejected() {
        let mut form = valid_form();
        form.isbn = "97804abc".into();
        let err = form.parse_inputs().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCharacters {
                field: "ISBN",
                rule: CharRule::DigitsOnly,
            }
        ));
    }

    #[test]
    fn hyphenated_isbn_passes_the_character_rule() {
        let mut form = valid_form();
        form.isbn = "978-0441-013593".into();
        assert!(form.parse_inputs().is_ok());
    }

    #[test]
    fn year_must_be_nonempty_digits() {
        let mut form = valid_form();
        form.year = "19x5".into();
        assert!(matches!(
            form.parse_inputs().unwrap_err(),
            CatalogError::InvalidCharacters { field: "Year", .. }
        ));

        form.year.clear();
        assert!(matches!(
            form.parse_inputs().unwrap_err(),
            CatalogError::InvalidCharacters { field: "Year", .. }
        ));
    }

    #[test]
    fn clear_fields_empties_every_input() {
        let mut form = valid_form();
        form.error = Some("stale".into());
        form.clear_fields();
        assert!(form.title.is_empty());
        assert!(form.author.is_empty());
        assert!(form.isbn.is_empty());
        assert!(form.genre.is_empty());
        assert!(form.year.is_empty());
        assert!(form.error.is_none());
    }
}
