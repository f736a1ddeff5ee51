//! Reorder and resize controllers.
//!
//! Pointer capture and hit-testing live outside the core. Controllers
//! receive already-resolved indices (or a proposed width) and are
//! responsible for clamping, rejecting no-ops, and producing exactly one
//! command. They never mutate the model directly; live-drag preview stays
//! a presentation concern until the gesture ends.

use crate::engine::Command;
use crate::model::{ColumnId, Table, MIN_COLUMN_WIDTH};

/// Translates a resolved row drop into a move command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowReorder;

impl RowReorder {
    /// Resolve dropping the rule at `from` onto candidate index `to`.
    /// Returns `None` for an unknown source or a same-index no-op.
    pub fn drop_intent(table: &Table, from: usize, to: usize) -> Option<Command> {
        let rule = table.rules().get(from)?;
        let to = to.min(table.rule_count().saturating_sub(1));
        if to == from {
            return None;
        }
        Some(Command::MoveRule {
            rule_id: rule.id.clone(),
            to_index: to,
        })
    }
}

/// Translates a resolved column drop into a move command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnReorder;

impl ColumnReorder {
    pub fn drop_intent(table: &Table, from: usize, to: usize) -> Option<Command> {
        let column = table.columns().get(from)?;
        let to = to.min(table.column_count().saturating_sub(1));
        if to == from {
            return None;
        }
        Some(Command::MoveColumn {
            column_id: column.id.clone(),
            to_index: to,
        })
    }
}

/// Translates an end-of-gesture resize into a width command.
#[derive(Debug, Clone, Copy)]
pub struct ColumnResize {
    pub min_width: u32,
}

impl Default for ColumnResize {
    fn default() -> Self {
        Self {
            min_width: MIN_COLUMN_WIDTH,
        }
    }
}

impl ColumnResize {
    /// Resolve a proposed width for the column. The width is clamped to
    /// the minimum; an unknown column or an unchanged width yields no
    /// command.
    pub fn resize_intent(&self, table: &Table, column_id: &ColumnId, width: u32) -> Option<Command> {
        let column = table.column(column_id)?;
        let width = width.max(self.min_width);
        if width == column.width {
            return None;
        }
        Some(Command::SetColumnWidth {
            column_id: column_id.clone(),
            width,
        })
    }
}
