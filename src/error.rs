//! Error taxonomy for structural mutations.
//!
//! Every variant is detected before any state is touched: a failed command
//! leaves the table, the undo/redo stacks, and the selection exactly as
//! they were. Unparsable cell text is deliberately *not* here — it is
//! recorded as cell status, never rejected.

use thiserror::Error;

use crate::model::{ColumnId, RuleId};

/// A rejected structural mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Rule/column cardinality violated: a rule's cell count does not
    /// match the column count, or a restored column's cell count does
    /// not match the rule count.
    #[error("{entity} carries {actual} cells but expected {expected}")]
    StructuralMismatch {
        entity: String,
        actual: usize,
        expected: usize,
    },

    /// An insert or move index outside the valid range.
    #[error("index {index} out of range, expected at most {max}")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("no column with id {0}")]
    UnknownColumn(ColumnId),

    #[error("no rule with id {0}")]
    UnknownRule(RuleId),

    /// An inserted column or rule reuses an id already present.
    #[error("id {0} already exists in the table")]
    DuplicateId(String),

    /// No registered cell editor claims the column.
    #[error("no cell editor claims column {0}")]
    NoEditor(ColumnId),
}
