//! Domain models that mirror the columns of the business CSV and get passed
//! throughout the TUI. These types stay light-weight data holders so the store
//! can focus on persistence and the UI on presentation.

use std::fmt;

/// One column of the business table. The variant order is the on-disk column
/// order, so `Field::ALL` doubles as the CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Category,
    Address,
    Phone,
    Website,
    Hours,
    Description,
    Latitude,
    Longitude,
}

impl Field {
    /// Every column in header order.
    pub const ALL: [Field; 10] = [
        Field::Id,
        Field::Name,
        Field::Category,
        Field::Address,
        Field::Phone,
        Field::Website,
        Field::Hours,
        Field::Description,
        Field::Latitude,
        Field::Longitude,
    ];

    /// Columns a user may edit, in the order the forms present them.
    pub const EDITABLE: [Field; 9] = [
        Field::Name,
        Field::Category,
        Field::Address,
        Field::Phone,
        Field::Website,
        Field::Hours,
        Field::Description,
        Field::Latitude,
        Field::Longitude,
    ];

    /// Columns that must be non-empty for a record to be accepted.
    pub const REQUIRED: [Field; 3] = [Field::Name, Field::Category, Field::Address];

    /// Header text used in the CSV file.
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Name => "Name",
            Field::Category => "Category",
            Field::Address => "Address",
            Field::Phone => "Phone",
            Field::Website => "Website",
            Field::Hours => "Hours",
            Field::Description => "Description",
            Field::Latitude => "Latitude",
            Field::Longitude => "Longitude",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single business entry. All ten columns are always present; anything the
/// file did not provide is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BusinessRecord {
    values: [String; 10],
}

impl BusinessRecord {
    /// Assemble a record from an ID and a validated draft.
    pub fn from_draft(id: impl Into<String>, draft: &Draft) -> Self {
        let mut record = Self::default();
        record.set(Field::Id, id);
        record.apply(draft);
        record
    }

    pub fn id(&self) -> &str {
        self.get(Field::Id)
    }

    pub fn name(&self) -> &str {
        self.get(Field::Name)
    }

    pub fn category(&self) -> &str {
        self.get(Field::Category)
    }

    pub fn address(&self) -> &str {
        self.get(Field::Address)
    }

    pub fn description(&self) -> &str {
        self.get(Field::Description)
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Overwrite every editable column with the draft's values. The ID is
    /// never touched.
    pub fn apply(&mut self, draft: &Draft) {
        for field in Field::EDITABLE {
            self.set(field, draft.get(field));
        }
    }

    /// Column values in on-disk order, ready for the CSV writer.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl fmt::Display for BusinessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category().trim().is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{} ({})", self.name(), self.category())
        }
    }
}

/// Field values collected from a form, not yet validated or assigned an ID.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    values: [String; 10],
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy in tests and when seeding forms.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Prefill a draft from an existing record when entering edit mode.
    pub fn from_record(record: &BusinessRecord) -> Self {
        let mut draft = Self::default();
        for field in Field::EDITABLE {
            draft.set(field, record.get(field));
        }
        draft
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Setting `Field::Id` is ignored: drafts never carry an identity.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if field != Field::Id {
            self.values[field.index()] = value.into();
        }
    }

    /// Copy with surrounding whitespace stripped from every value.
    pub fn trimmed(&self) -> Self {
        let mut draft = Self::default();
        for field in Field::EDITABLE {
            draft.set(field, self.get(field).trim());
        }
        draft
    }

    /// Required columns that are blank once trimmed.
    pub fn missing_required(&self) -> Vec<&'static str> {
        Field::REQUIRED
            .iter()
            .filter(|field| self.get(**field).trim().is_empty())
            .map(|field| field.name())
            .collect()
    }
}

/// Column a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Category,
}

impl SortKey {
    pub fn field(self) -> Field {
        match self {
            SortKey::Name => Field::Name,
            SortKey::Category => Field::Category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}
