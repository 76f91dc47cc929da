//! Ratatui front-end for the business directory. The UI never edits records
//! itself: every add, edit, and delete is forwarded to the record store, and
//! the result list is recomputed from the store afterwards.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::{App, LinkOpener};
pub use terminal::run_app;
