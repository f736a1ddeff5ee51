//! In-progress cell edits.

use crate::model::{Cell, Column, ColumnId};

/// One in-progress edit of a single cell.
///
/// The session holds a text buffer seeded from the cell plus the original
/// raw value, so a cancel can discard everything without touching the
/// model. The concrete widget behind the session lives outside the core;
/// it manipulates the buffer through [`set_text`](Self::set_text).
#[derive(Debug, Clone)]
pub struct EditSession {
    column_id: ColumnId,
    buffer: String,
    original: String,
    /// Expression language the session edits under, when the generic
    /// expression editor opened it.
    language: Option<String>,
}

impl EditSession {
    /// Session seeded with the cell's current raw text.
    pub fn open(cell: &Cell, column: &Column) -> Self {
        Self {
            column_id: column.id.clone(),
            buffer: cell.raw().to_string(),
            original: cell.raw().to_string(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// The raw value before editing began.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_modified(&self) -> bool {
        self.buffer != self.original
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Consume the session, yielding the buffer.
    pub fn into_text(self) -> String {
        self.buffer
    }
}
