use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{BusinessRecord, Draft, Field};

/// Column width reserved for field labels so values line up.
pub(crate) const LABEL_WIDTH: usize = "Description: ".len();

/// Form state for adding or editing a business.
#[derive(Default, Clone)]
pub(crate) struct BusinessForm {
    pub(crate) draft: Draft,
    active: usize,
    pub(crate) error: Option<String>,
}

impl BusinessForm {
    /// Populate the form from an existing business when editing.
    pub(crate) fn from_record(record: &BusinessRecord) -> Self {
        Self {
            draft: Draft::from_record(record),
            ..Self::default()
        }
    }

    pub(crate) fn active_field(&self) -> Field {
        Field::EDITABLE[self.active]
    }

    /// Row of the active field within the form body.
    pub(crate) fn active_row(&self) -> usize {
        self.active
    }

    pub(crate) fn next_field(&mut self) {
        self.active = (self.active + 1) % Field::EDITABLE.len();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = (self.active + Field::EDITABLE.len() - 1) % Field::EDITABLE.len();
    }

    /// Append a character to the active field. Control characters are
    /// rejected.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active_field();
        let mut value = self.draft.get(field).to_string();
        value.push(ch);
        self.draft.set(field, value);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active_field();
        let mut value = self.draft.get(field).to_string();
        value.pop();
        self.draft.set(field, value);
    }

    pub(crate) fn value_len(&self, field: Field) -> usize {
        self.draft.get(field).chars().count()
    }

    /// Render one labelled line of the form.
    pub(crate) fn build_line(&self, field: Field) -> Line<'static> {
        let value = self.draft.get(field);
        let is_active = self.active_field() == field;
        let required = Field::REQUIRED.contains(&field);

        let display = if value.is_empty() && required && !is_active {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let label = format!("{}:", field.name());
        Line::from(vec![
            Span::raw(format!("{label:<width$}", width = LABEL_WIDTH)),
            Span::styled(display, style),
        ])
    }
}

/// Pending delete awaiting a yes/no answer.
#[derive(Clone)]
pub(crate) struct ConfirmDelete {
    pub(crate) id: String,
    pub(crate) name: String,
}

impl ConfirmDelete {
    pub(crate) fn from(record: &BusinessRecord) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
        }
    }
}
