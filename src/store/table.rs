use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use atomicwrites::{AtomicFile, OverwriteBehavior};
use tracing::{debug, info, warn};

use crate::models::{BusinessRecord, Field};

use super::error::{LoadWarning, StoreError, TableError};

/// Columns whose absence from the header earns a load warning.
const ESSENTIAL_COLUMNS: [Field; 4] = [Field::Name, Field::Category, Field::Address, Field::Phone];

/// Result of reading the table from disk.
#[derive(Debug, Default)]
pub struct Loaded {
    pub records: Vec<BusinessRecord>,
    pub warning: Option<LoadWarning>,
    /// True when the file did not exist and a header-only table was created.
    pub created: bool,
}

/// The header-plus-rows CSV file backing the directory.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row into a fixed-shape record. A missing file is created
    /// with just the header and yields no records.
    pub fn load(&self) -> Result<Loaded, StoreError> {
        if !self.path.exists() {
            self.write_rows(&[]).map_err(|source| StoreError::Load {
                path: self.path.clone(),
                source,
            })?;
            info!(path = %self.path.display(), "created empty business table");
            return Ok(Loaded {
                created: true,
                ..Loaded::default()
            });
        }

        let loaded = self.read_rows().map_err(|source| StoreError::Load {
            path: self.path.clone(),
            source,
        })?;

        if let Some(warning) = &loaded.warning {
            warn!(path = %self.path.display(), "{warning}");
        }
        debug!(path = %self.path.display(), rows = loaded.records.len(), "loaded business table");
        Ok(loaded)
    }

    /// Replace the file with the header followed by one row per record. The
    /// write lands in a temporary file that is renamed over the original, so a
    /// failure never leaves a truncated table behind.
    pub fn save(&self, records: &[BusinessRecord]) -> Result<(), StoreError> {
        self.write_rows(records).map_err(|source| StoreError::Save {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), rows = records.len(), "saved business table");
        Ok(())
    }

    fn read_rows(&self) -> Result<Loaded, TableError> {
        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers()?.clone();
        let positions: Vec<(Field, Option<usize>)> = Field::ALL
            .iter()
            .map(|field| (*field, headers.iter().position(|h| h == field.name())))
            .collect();

        let missing: Vec<&'static str> = ESSENTIAL_COLUMNS
            .iter()
            .filter(|field| !headers.iter().any(|h| h == field.name()))
            .map(|field| field.name())
            .collect();
        let warning = (!missing.is_empty()).then(|| LoadWarning::MissingColumns(missing));

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record = BusinessRecord::default();
            for (field, position) in &positions {
                if let Some(value) = position.and_then(|idx| row.get(idx)) {
                    record.set(*field, value);
                }
            }
            records.push(record);
        }

        Ok(Loaded {
            records,
            warning,
            created: false,
        })
    }

    fn write_rows(&self, records: &[BusinessRecord]) -> Result<(), TableError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|file| {
                let mut writer = csv::Writer::from_writer(file);
                writer.write_record(Field::ALL.iter().map(|field| field.name()))?;
                for record in records {
                    writer.write_record(record.values())?;
                }
                writer.flush()?;
                Ok::<(), TableError>(())
            })
            .map_err(|err| match err {
                atomicwrites::Error::Internal(io) => TableError::Io(io),
                atomicwrites::Error::User(inner) => inner,
            })
    }
}
