use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the record store. Each variant maps to a distinct
/// outcome the UI reports differently.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The table could not be created, opened, or parsed. Startup must stop.
    #[error("could not load business data from '{}'", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    /// Persisting the collection failed; the previous file content stands.
    #[error("could not save business data to '{}'", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    /// Required fields were blank; nothing was changed.
    #[error("{}", describe_missing(.missing))]
    Validation { missing: Vec<&'static str> },

    #[error("No business with ID '{id}' exists.")]
    NotFound { id: String },
}

fn describe_missing(missing: &[&str]) -> String {
    let verb = if missing.len() == 1 { "is" } else { "are" };
    format!("{} {verb} required.", missing.join(", "))
}

/// Low-level cause behind a load or save failure.
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Non-fatal conditions found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The header lacks some of the columns the directory relies on; those
    /// fields will show up empty.
    MissingColumns(Vec<&'static str>),
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MissingColumns(columns) => write!(
                f,
                "Business file might be missing essential columns ({}).",
                columns.join(", ")
            ),
        }
    }
}
