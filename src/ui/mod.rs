//! Ratatui front-end for the library catalog. The controller here owns the
//! form and selection state, runs every validation rule before the store is
//! contacted, and reloads the full list after each successful mutation so
//! the table always mirrors what is persisted.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
