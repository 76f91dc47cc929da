//! Core library surface for the business directory TUI application.
//!
//! The record store is the heart of the crate; the UI, map links, and
//! configuration are thin layers around it so the `bin` target and tests can
//! reuse the same pieces.
pub mod config;
pub mod logging;
pub mod map;
pub mod models;
pub mod store;
pub mod ui;

/// Persistence and query surface.
pub use store::{search, sort, LoadWarning, RecordStore, StoreError};

/// Domain types that other layers manipulate.
pub use models::{BusinessRecord, Draft, Field, SortKey, SortOrder};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
