//! The cell-editing contract and editor resolution.

use crate::model::{Cell, Column};

use super::session::EditSession;

/// Type-specific strategy for editing a cell's raw value.
///
/// `commit` returns a raw string; the model then independently parses and
/// validates it against the column's type, so an editor can never bypass
/// model validation. `cancel` discards the session without validation and
/// without emitting a command.
pub trait CellEditor {
    /// Short identifier for logging and debugging.
    fn name(&self) -> &'static str;

    /// Whether this variant takes responsibility for cells of the given
    /// column.
    fn can_edit(&self, column: &Column) -> bool;

    /// Begin an editing session seeded with the cell's current raw text.
    fn open(&self, cell: &Cell, column: &Column) -> EditSession {
        EditSession::open(cell, column)
    }

    /// End the session, yielding the raw value to hand to the model.
    fn commit(&self, session: EditSession) -> String {
        session.into_text()
    }

    /// Discard the session.
    fn cancel(&self, session: EditSession) {
        drop(session);
    }
}

/// Ordered collection of editor variants.
///
/// Resolution walks registration order and picks the first variant whose
/// `can_edit` claims the column. Simple-mode variants registered ahead of
/// the expression fallback shadow it for recognized types while arbitrary
/// expressions stay editable through the fallback.
pub struct EditorRegistry {
    editors: Vec<Box<dyn CellEditor>>,
}

impl Default for EditorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorRegistry {
    /// An empty registry. Most callers want
    /// [`with_defaults`](Self::with_defaults) instead.
    pub fn new() -> Self {
        Self {
            editors: Vec::new(),
        }
    }

    pub fn register(&mut self, editor: Box<dyn CellEditor>) {
        self.editors.push(editor);
    }

    /// The first registered editor claiming the column, if any.
    pub fn resolve(&self, column: &Column) -> Option<&dyn CellEditor> {
        self.editors
            .iter()
            .map(|e| e.as_ref())
            .find(|e| e.can_edit(column))
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

impl std::fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.editors.iter().map(|e| e.name()))
            .finish()
    }
}
