//! The record store: the single owner of the business collection. Every
//! mutation goes through [`RecordStore`] and is written to disk before the
//! call returns, so the in-memory list and the CSV file never drift apart.

mod error;
mod query;
mod table;

use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{BusinessRecord, Draft, Field};

pub use error::{LoadWarning, StoreError, TableError};
pub use query::{search, sort};
pub use table::{CsvTable, Loaded};

/// Owns the authoritative list of businesses and its backing table.
#[derive(Debug)]
pub struct RecordStore {
    table: CsvTable,
    records: Vec<BusinessRecord>,
    warning: Option<LoadWarning>,
}

impl RecordStore {
    /// Load the table at `path`, creating it when absent.
    ///
    /// Rows without an ID receive a fresh one in memory so they can be edited
    /// and deleted like any other entry; the ID reaches disk on the next save.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let table = CsvTable::new(path.as_ref());
        let Loaded {
            mut records,
            warning,
            created,
        } = table.load()?;

        let mut assigned = 0usize;
        for record in records.iter_mut().filter(|r| r.id().trim().is_empty()) {
            record.set(Field::Id, new_id());
            assigned += 1;
        }
        if assigned > 0 {
            info!(assigned, "assigned IDs to rows that had none");
        }

        info!(
            path = %table.path().display(),
            records = records.len(),
            created,
            "opened business directory"
        );

        Ok(Self {
            table,
            records,
            warning,
        })
    }

    pub fn path(&self) -> &Path {
        self.table.path()
    }

    /// Non-fatal problem noticed while loading, if any.
    pub fn warning(&self) -> Option<&LoadWarning> {
        self.warning.as_ref()
    }

    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BusinessRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Persist the current collection as-is.
    pub fn save(&self) -> Result<(), StoreError> {
        self.table.save(&self.records)
    }

    /// Validate the draft, give it a fresh ID, append it, and persist.
    pub fn insert(&mut self, draft: &Draft) -> Result<BusinessRecord, StoreError> {
        let draft = validate(draft)?;
        let record = BusinessRecord::from_draft(new_id(), &draft);

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;

        info!(id = record.id(), name = record.name(), "inserted business");
        Ok(record)
    }

    /// Replace every field but the ID on the record matching `id`, then
    /// persist.
    pub fn update(&mut self, id: &str, draft: &Draft) -> Result<BusinessRecord, StoreError> {
        let draft = validate(draft)?;
        let position = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let mut next = self.records.clone();
        next[position].apply(&draft);
        let updated = next[position].clone();
        self.commit(next)?;

        info!(id, name = updated.name(), "updated business");
        Ok(updated)
    }

    /// Remove the record matching `id` and persist. Unknown IDs are a no-op
    /// and skip the write; the return value tells whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let next: Vec<BusinessRecord> = self
            .records
            .iter()
            .filter(|r| r.id() != id)
            .cloned()
            .collect();

        if next.len() == self.records.len() {
            debug!(id, "delete skipped, no such business");
            return Ok(false);
        }

        self.commit(next)?;
        info!(id, "deleted business");
        Ok(true)
    }

    /// Write the candidate collection and only adopt it once it is on disk.
    fn commit(&mut self, next: Vec<BusinessRecord>) -> Result<(), StoreError> {
        self.table.save(&next)?;
        self.records = next;
        Ok(())
    }
}

fn validate(draft: &Draft) -> Result<Draft, StoreError> {
    let draft = draft.trimmed();
    let missing = draft.missing_required();
    if missing.is_empty() {
        Ok(draft)
    } else {
        Err(StoreError::Validation { missing })
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
