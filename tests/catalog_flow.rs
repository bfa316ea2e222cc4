//! End-to-end lifecycle of a catalog record through the public store API.

use library_catalog_manager::db::{
    delete_book, fetch_books, initialize, insert_book, search_books, update_book,
};
use library_catalog_manager::models::BookDraft;
use rusqlite::Connection;

fn dune() -> BookDraft {
    BookDraft {
        title: "Dune".into(),
        author: "Herbert".into(),
        isbn: "9780441013593".into(),
        genre: "SciFi".into(),
        year: "1965".into(),
    }
}

#[test]
fn add_update_delete_lifecycle() {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();

    let book = insert_book(&conn, &dune()).unwrap();
    let books = fetch_books(&conn).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, book.id);
    assert_eq!(books[0].year, "1965");

    let mut revised = dune();
    revised.year = "1966".into();
    update_book(&conn, book.id, &revised).unwrap();

    let books = fetch_books(&conn).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].year, "1966");
    assert_eq!(books[0].title, "Dune");

    delete_book(&conn, book.id).unwrap();
    assert!(fetch_books(&conn).unwrap().is_empty());
}

#[test]
fn search_finds_by_title_and_isbn_after_mutations() {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();

    let book = insert_book(&conn, &dune()).unwrap();

    let by_title = search_books(&conn, "dune").unwrap();
    assert_eq!(by_title.len(), 1);

    let by_isbn = search_books(&conn, "013593").unwrap();
    assert_eq!(by_isbn.len(), 1);
    assert_eq!(by_isbn[0].id, book.id);

    delete_book(&conn, book.id).unwrap();
    assert!(search_books(&conn, "dune").unwrap().is_empty());
}
