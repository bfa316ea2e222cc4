use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{delete_book, fetch_books, insert_book, search_books, update_book};
use crate::error::CatalogError;
use crate::models::Book;

use super::forms::{BookField, BookForm, ConfirmDelete};
use super::helpers::centered_rect;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Which record set the table is showing. Leaving `Searching` clears the
/// term; any successful mutation also falls back to `Browsing` because the
/// full list is reloaded afterward.
enum ListView {
    Browsing,
    Searching { term: String },
}

/// Fine-grained interaction modes layered over the table. The modal flows
/// (add/edit/confirm/search) each own their state so cancelling one never
/// leaves half-applied edits behind.
enum Mode {
    Normal,
    AddingBook(BookForm),
    EditingBook { id: i64, form: BookForm },
    ConfirmDelete(ConfirmDelete),
    Searching(SearchState),
}

/// State for the search prompt. The query only hits the database when the
/// user commits it with Enter.
#[derive(Default)]
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Combines the persistent
/// connection, the loaded record list, and the active interaction mode.
pub struct App {
    conn: Connection,
    books: Vec<Book>,
    cursor: usize,
    view: ListView,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection, books: Vec<Book>) -> Self {
        Self {
            conn,
            books,
            cursor: 0,
            view: ListView::Browsing,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Top-level key dispatcher. Every key funnels through the active `Mode`,
    /// which returns the next mode to run. The boolean result tells the outer
    /// loop whether the user requested an exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::EditingBook { id, form } => self.handle_edit_book(code, id, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Handle keys while no modal is open: table navigation plus the entry
    /// points into the add/edit/delete/search flows. Edit and delete demand a
    /// row under the cursor and fail locally otherwise, without touching the
    /// store.
    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc => {
                if matches!(self.view, ListView::Searching { .. }) {
                    self.show_all_books()?;
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Ok(Mode::AddingBook(BookForm::default()));
            }
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(book) = self.current_book().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingBook {
                        id: book.id,
                        form: BookForm::from_book(&book),
                    });
                } else {
                    self.set_status("No book selected to edit.", StatusKind::Error);
                }
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(book) = self.current_book().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(ConfirmDelete { book }));
                } else {
                    self.set_status("No book selected to delete.", StatusKind::Error);
                }
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState::default()));
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    /// Process key presses while the "Add Book" form is active.
    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    /// Mirror of `handle_add_book` for edits, keeping the book id intact so
    /// the update targets the originally selected row.
    fn handle_edit_book(&mut self, code: KeyCode, id: i64, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_existing_book(id, &form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::EditingBook { id, form })
        } else {
            Ok(Mode::Normal)
        }
    }

    /// Confirmation dialog for deletion. Escape or N cancels and leaves every
    /// piece of state unchanged; Enter or Y performs the delete.
    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.perform_delete(&confirm) {
                    Ok(_) => Ok(Mode::Normal),
                    Err(err) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                        Ok(Mode::ConfirmDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    /// Handle keys while the search prompt is open. The query is only sent to
    /// the store when committed with Enter; an empty trimmed term is rejected
    /// locally and the table keeps showing whatever it showed before.
    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Search cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Enter => {
                let term = state.query.trim().to_string();
                if term.is_empty() {
                    self.set_status("Please enter a search term.", StatusKind::Error);
                    return Ok(Mode::Searching(state));
                }
                return match self.run_search(&term) {
                    Ok(count) => {
                        let plural = if count == 1 { "" } else { "s" };
                        self.set_status(
                            format!("{count} book{plural} match '{term}'."),
                            StatusKind::Info,
                        );
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                        Ok(Mode::Searching(state))
                    }
                };
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                }
            }
            _ => {}
        }
        Ok(Mode::Searching(state))
    }

    /// Called from the event loop when Ctrl+U is pressed: reset all form
    /// fields while keeping the form (and its edit target) open.
    pub(crate) fn handle_ctrl_u(&mut self) -> Result<()> {
        let cleared = match &mut self.mode {
            Mode::AddingBook(form) | Mode::EditingBook { form, .. } => {
                form.clear_fields();
                true
            }
            _ => false,
        };
        if cleared {
            self.set_status("Fields cleared.", StatusKind::Info);
        }
        Ok(())
    }

    /// Validate the form and persist a new book, then reload the catalog so
    /// the table reflects the stored state. Validation failures return before
    /// the store is contacted.
    fn save_new_book(&mut self, form: &BookForm) -> Result<(), CatalogError> {
        let draft = form.parse_inputs()?;
        let book = insert_book(&self.conn, &draft)?;
        self.reload_books(Some(book.id))?;
        self.set_status(format!("Added '{}'.", book.title), StatusKind::Info);
        Ok(())
    }

    /// Validate the form and replace the fields of the selected book. Same
    /// ruleset as adding.
    fn save_existing_book(&mut self, id: i64, form: &BookForm) -> Result<(), CatalogError> {
        let draft = form.parse_inputs()?;
        update_book(&self.conn, id, &draft)?;
        self.reload_books(Some(id))?;
        self.set_status(format!("Updated '{}'.", draft.title), StatusKind::Info);
        Ok(())
    }

    /// Delete the book confirmed by the user and refresh the table.
    fn perform_delete(&mut self, confirm: &ConfirmDelete) -> Result<(), CatalogError> {
        delete_book(&self.conn, confirm.book.id)?;
        self.reload_books(None)?;
        self.set_status(
            format!("Deleted '{}'.", confirm.book.title),
            StatusKind::Info,
        );
        Ok(())
    }

    /// Execute a committed search and switch the table to the result view.
    fn run_search(&mut self, term: &str) -> Result<usize, CatalogError> {
        self.books = search_books(&self.conn, term)?;
        self.view = ListView::Searching {
            term: term.to_string(),
        };
        self.cursor = 0;
        Ok(self.books.len())
    }

    /// Drop an active search: clear the term and show the full catalog again.
    fn show_all_books(&mut self) -> Result<(), CatalogError> {
        self.reload_books(None)?;
        self.set_status("Showing all books.", StatusKind::Info);
        Ok(())
    }

    /// Reload the full catalog from the store and optionally focus a specific
    /// id, keeping the user's place after updates. Always returns the table
    /// to the browsing view.
    fn reload_books(&mut self, focus_id: Option<i64>) -> Result<(), CatalogError> {
        self.books = fetch_books(&self.conn)?;
        self.view = ListView::Browsing;

        if self.books.is_empty() {
            self.cursor = 0;
            return Ok(());
        }

        if let Some(id) = focus_id {
            if let Some(idx) = self.books.iter().position(|b| b.id == id) {
                self.cursor = idx;
                return Ok(());
            }
        }

        if self.cursor >= self.books.len() {
            self.cursor = self.books.len() - 1;
        }

        Ok(())
    }

    /// The book under the cursor, if the list is non-empty.
    fn current_book(&self) -> Option<&Book> {
        self.books.get(self.cursor)
    }

    fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let len = self.books.len() as isize;
        let mut new = self.cursor as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.cursor = new as usize;
    }

    fn select_first(&mut self) {
        if !self.books.is_empty() {
            self.cursor = 0;
        }
    }

    fn select_last(&mut self) {
        if !self.books.is_empty() {
            self.cursor = self.books.len() - 1;
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Main render routine invoked each tick by Ratatui. Splits the frame
    /// into the table and the footer, then overlays the active modal.
    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_book_table(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, "Add Book", form),
            Mode::EditingBook { form, .. } => self.draw_book_form(frame, area, "Edit Book", form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    /// Render the six-column catalog table with the cursor row highlighted.
    fn draw_book_table(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.view {
            ListView::Browsing => "All Books".to_string(),
            ListView::Searching { term } => format!("Search results for '{term}'"),
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.books.is_empty() {
            let text = match &self.view {
                ListView::Browsing => "No books yet. Press '+' to add one.",
                ListView::Searching { .. } => {
                    "No books match the search. Press Esc to show all books."
                }
            };
            let message = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(["ID", "Title", "Author", "ISBN", "Genre", "Year"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.books.iter().map(|book| {
            Row::new(vec![
                Cell::from(book.id.to_string()),
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(book.isbn.clone()),
                Cell::from(book.genre.clone()),
                Cell::from(book.year.clone()),
            ])
        });

        let widths = [
            Constraint::Length(5),
            Constraint::Percentage(28),
            Constraint::Percentage(22),
            Constraint::Length(16),
            Constraint::Percentage(18),
            Constraint::Length(6),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut table_state = TableState::default();
        table_state.select(Some(self.cursor.min(self.books.len() - 1)));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::AddingBook(_) | Mode::EditingBook { .. } => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Ctrl+U]", key_style),
                Span::raw(" Clear Fields   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::ConfirmDelete(_) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Searching(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Search   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Normal => {
                let mut spans = vec![
                    Span::styled("[↑↓]", key_style),
                    Span::raw(" Select   "),
                    Span::styled("[+]", key_style),
                    Span::raw(" Add   "),
                    Span::styled("[e]", key_style),
                    Span::raw(" Edit   "),
                    Span::styled("[-]", key_style),
                    Span::raw(" Delete   "),
                    Span::styled("[f]", key_style),
                    Span::raw(" Search   "),
                ];
                if matches!(self.view, ListView::Searching { .. }) {
                    spans.push(Span::styled("[Esc]", key_style));
                    spans.push(Span::raw(" All Books   "));
                }
                spans.push(Span::styled("[q]", key_style));
                spans.push(Span::raw(" Quit"));
                Line::from(spans)
            }
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &BookForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line<'static>> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch fields • Ctrl+U to clear • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let active = form.active;
        let prefix = format!("{}: ", active.label()).len() as u16;
        let cursor_x = inner.x + prefix + form.value_len(active) as u16;
        let cursor_y = inner.y + active.index() as u16;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete '{}'?", confirm.book.display_title())),
            Line::from("This permanently removes the book from the catalog."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    /// Draw a small search bar at the top of the frame showing the current
    /// query and placing the cursor at the end of the typed text.
    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search by Title or ISBN");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize;

    fn test_app() -> App {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        App::new(conn, Vec::new())
    }

    fn filled_form(title: &str, isbn: &str) -> BookForm {
        BookForm {
            title: title.into(),
            author: "Herbert".into(),
            isbn: isbn.into(),
            genre: "SciFi".into(),
            year: "1965".into(),
            ..BookForm::default()
        }
    }

    #[test]
    fn invalid_form_never_reaches_the_store() {
        let mut app = test_app();
        let mut form = filled_form("Dune", "9780441013593");
        form.title = "Book1".into();

        let err = app.save_new_book(&form).unwrap_err();
        assert!(err.is_validation());
        assert!(fetch_books(&app.conn).unwrap().is_empty());
    }

    #[test]
    fn successful_save_reloads_and_discards_active_search() {
        let mut app = test_app();
        app.save_new_book(&filled_form("Dune", "111")).unwrap();

        app.view = ListView::Searching { term: "zzz".into() };
        app.books.clear();

        app.save_new_book(&filled_form("Emma", "222")).unwrap();
        assert!(matches!(app.view, ListView::Browsing));
        assert_eq!(app.books.len(), 2);
    }

    #[test]
    fn edit_and_delete_require_a_selected_row() {
        let mut app = test_app();
        let mut exit = false;

        let mode = app.handle_normal_key(KeyCode::Char('e'), &mut exit).unwrap();
        assert!(matches!(mode, Mode::Normal));
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Error,
                ..
            })
        ));

        app.clear_status();
        let mode = app.handle_normal_key(KeyCode::Char('-'), &mut exit).unwrap();
        assert!(matches!(mode, Mode::Normal));
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Error,
                ..
            })
        ));
        assert!(!exit);
    }

    #[test]
    fn empty_search_term_is_rejected_locally() {
        let mut app = test_app();
        app.mode = Mode::Searching(SearchState {
            query: "   ".into(),
        });

        let exit = app.handle_key(KeyCode::Enter).unwrap();
        assert!(!exit);
        assert!(matches!(app.mode, Mode::Searching(_)));
        assert!(matches!(app.view, ListView::Browsing));
    }

    #[test]
    fn committed_search_filters_and_escape_restores() {
        let mut app = test_app();
        app.save_new_book(&filled_form("Dune", "111")).unwrap();
        app.save_new_book(&filled_form("Emma", "222")).unwrap();

        app.mode = Mode::Searching(SearchState {
            query: "dune".into(),
        });
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.view, ListView::Searching { .. }));
        assert_eq!(app.books.len(), 1);
        assert_eq!(app.books[0].title, "Dune");

        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.view, ListView::Browsing));
        assert_eq!(app.books.len(), 2);
    }

    #[test]
    fn duplicate_isbn_surfaces_the_store_error() {
        let mut app = test_app();
        app.save_new_book(&filled_form("Dune", "111")).unwrap();

        let err = app.save_new_book(&filled_form("Emma", "111")).unwrap_err();
        assert!(matches!(err, CatalogError::ConstraintViolation { .. }));
        assert_eq!(app.books.len(), 1);
    }

    #[test]
    fn ctrl_u_clears_the_open_form_without_closing_it() {
        let mut app = test_app();
        app.mode = Mode::EditingBook {
            id: 7,
            form: filled_form("Dune", "111"),
        };

        app.handle_ctrl_u().unwrap();
        match &app.mode {
            Mode::EditingBook { id, form } => {
                assert_eq!(*id, 7);
                assert!(form.title.is_empty());
                assert!(form.year.is_empty());
            }
            _ => panic!("form should remain open"),
        }
    }
}
