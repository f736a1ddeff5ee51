//! Reversible structural commands.
//!
//! Applying a command yields the inverse that undoes it; the inverse is
//! captured from the state the command displaced (removed cells, previous
//! values, original indices), so undo restores bit-identical state.
//! `Batch` composes sub-commands into a single all-or-nothing unit.

use crate::error::CommandError;
use crate::events::TableChanged;
use crate::model::{Cell, Column, ColumnId, Rule, RuleId, Table};
use crate::value::ValueType;

/// One atomic, reversible structural change.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert a column; every rule gains a cell at the same index.
    /// `cells` is `None` for fresh inserts (rules gain empty cells) and
    /// carries the displaced cells when the command is the inverse of a
    /// removal.
    InsertColumn {
        column: Column,
        index: usize,
        cells: Option<Vec<Cell>>,
    },
    RemoveColumn {
        column_id: ColumnId,
    },
    InsertRule {
        rule: Rule,
        index: usize,
    },
    RemoveRule {
        rule_id: RuleId,
    },
    /// In-place reorder; the inverse is a move back to the original index.
    MoveColumn {
        column_id: ColumnId,
        to_index: usize,
    },
    MoveRule {
        rule_id: RuleId,
        to_index: usize,
    },
    SetCellValue {
        rule_id: RuleId,
        column_id: ColumnId,
        value: String,
    },
    SetColumnWidth {
        column_id: ColumnId,
        width: u32,
    },
    SetColumnLabel {
        column_id: ColumnId,
        label: String,
    },
    /// Change a column's declared type, revalidating the whole column.
    SetColumnType {
        column_id: ColumnId,
        value_type: ValueType,
    },
    SetTableName {
        name: String,
    },
    SetHitPolicy {
        hit_policy: String,
    },
    /// Ordered sub-commands applied atomically: either all take effect or
    /// none do.
    Batch(Vec<Command>),
}

impl Command {
    /// Insert a column with fresh (empty) cells.
    pub fn insert_column(column: Column, index: usize) -> Self {
        Command::InsertColumn {
            column,
            index,
            cells: None,
        }
    }

    pub fn insert_rule(rule: Rule, index: usize) -> Self {
        Command::InsertRule { rule, index }
    }

    pub fn set_cell_value(
        rule_id: impl Into<RuleId>,
        column_id: impl Into<ColumnId>,
        value: impl Into<String>,
    ) -> Self {
        Command::SetCellValue {
            rule_id: rule_id.into(),
            column_id: column_id.into(),
            value: value.into(),
        }
    }

    /// Short identifier for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Command::InsertColumn { .. } => "column.insert",
            Command::RemoveColumn { .. } => "column.remove",
            Command::InsertRule { .. } => "rule.insert",
            Command::RemoveRule { .. } => "rule.remove",
            Command::MoveColumn { .. } => "column.move",
            Command::MoveRule { .. } => "rule.move",
            Command::SetCellValue { .. } => "cell.edit",
            Command::SetColumnWidth { .. } => "column.resize",
            Command::SetColumnLabel { .. } => "column.label",
            Command::SetColumnType { .. } => "column.type",
            Command::SetTableName { .. } => "table.name",
            Command::SetHitPolicy { .. } => "table.hit-policy",
            Command::Batch(_) => "batch",
        }
    }
}

/// Apply a command to the table. On success returns the captured inverse
/// and the change scope; on failure the table is untouched.
pub(crate) fn apply(
    table: &mut Table,
    command: &Command,
) -> Result<(Command, TableChanged), CommandError> {
    match command {
        Command::InsertColumn {
            column,
            index,
            cells,
        } => {
            let column_id = column.id.clone();
            table.insert_column(column.clone(), cells.clone(), *index)?;
            Ok((
                Command::RemoveColumn {
                    column_id: column_id.clone(),
                },
                TableChanged::columns([column_id]),
            ))
        }

        Command::RemoveColumn { column_id } => {
            let (column, index, cells) = table.remove_column(column_id)?;
            Ok((
                Command::InsertColumn {
                    column,
                    index,
                    cells: Some(cells),
                },
                TableChanged::columns([column_id.clone()]),
            ))
        }

        Command::InsertRule { rule, index } => {
            let rule_id = rule.id.clone();
            table.insert_rule(rule.clone(), *index)?;
            Ok((
                Command::RemoveRule {
                    rule_id: rule_id.clone(),
                },
                TableChanged::rules([rule_id]),
            ))
        }

        Command::RemoveRule { rule_id } => {
            let (rule, index) = table.remove_rule(rule_id)?;
            Ok((
                Command::InsertRule { rule, index },
                TableChanged::rules([rule_id.clone()]),
            ))
        }

        Command::MoveColumn {
            column_id,
            to_index,
        } => {
            let from = table.move_column(column_id, *to_index)?;
            Ok((
                Command::MoveColumn {
                    column_id: column_id.clone(),
                    to_index: from,
                },
                TableChanged::columns([column_id.clone()]),
            ))
        }

        Command::MoveRule { rule_id, to_index } => {
            let from = table.move_rule(rule_id, *to_index)?;
            Ok((
                Command::MoveRule {
                    rule_id: rule_id.clone(),
                    to_index: from,
                },
                TableChanged::rules([rule_id.clone()]),
            ))
        }

        Command::SetCellValue {
            rule_id,
            column_id,
            value,
        } => {
            let previous = table.set_cell_value(rule_id, column_id, value.clone())?;
            Ok((
                Command::SetCellValue {
                    rule_id: rule_id.clone(),
                    column_id: column_id.clone(),
                    value: previous,
                },
                TableChanged::cell(rule_id.clone(), column_id.clone()),
            ))
        }

        Command::SetColumnWidth { column_id, width } => {
            let previous = table.set_column_width(column_id, *width)?;
            Ok((
                Command::SetColumnWidth {
                    column_id: column_id.clone(),
                    width: previous,
                },
                TableChanged::columns([column_id.clone()]),
            ))
        }

        Command::SetColumnLabel { column_id, label } => {
            let previous = table.set_column_label(column_id, label.clone())?;
            Ok((
                Command::SetColumnLabel {
                    column_id: column_id.clone(),
                    label: previous,
                },
                TableChanged::columns([column_id.clone()]),
            ))
        }

        Command::SetColumnType {
            column_id,
            value_type,
        } => {
            let previous = table.set_column_type(column_id, *value_type)?;
            Ok((
                Command::SetColumnType {
                    column_id: column_id.clone(),
                    value_type: previous,
                },
                TableChanged::columns([column_id.clone()]),
            ))
        }

        Command::SetTableName { name } => {
            let previous = table.set_name(name.clone());
            Ok((Command::SetTableName { name: previous }, TableChanged::default()))
        }

        Command::SetHitPolicy { hit_policy } => {
            let previous = table.set_hit_policy(hit_policy.clone());
            Ok((
                Command::SetHitPolicy {
                    hit_policy: previous,
                },
                TableChanged::default(),
            ))
        }

        Command::Batch(commands) => {
            // All-or-nothing: run the whole batch against a scratch copy
            // and commit the copy only on full success. Sub-commands may
            // depend on the effects of earlier ones, so each is validated
            // against the state its predecessors produced.
            let mut scratch = table.clone();
            let mut inverses = Vec::with_capacity(commands.len());
            let mut changed = TableChanged::default();
            for sub in commands {
                let (inverse, scope) = apply(&mut scratch, sub)?;
                inverses.push(inverse);
                changed.merge(scope);
            }
            *table = scratch;
            // Undo must unwind in reverse order of application.
            inverses.reverse();
            Ok((Command::Batch(inverses), changed))
        }
    }
}
