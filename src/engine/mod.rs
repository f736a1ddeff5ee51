//! The reversible command engine.
//!
//! Every structural mutation is a [`Command`] executed here. The engine
//! applies commands against a table it is handed a mutable borrow of,
//! captures inverses as it goes, and keeps the undo/redo stacks. It holds
//! no table of its own, so model and engine stay independently
//! constructible and are wired together by whoever owns both.

mod command;
mod history;

pub use command::Command;
pub(crate) use command::apply;
pub use history::CommandHistory;

use crate::error::CommandError;
use crate::events::TableChanged;
use crate::model::Table;

/// Executes commands and owns the undo/redo stacks.
#[derive(Debug, Clone, Default)]
pub struct CommandEngine {
    history: CommandHistory,
}

impl CommandEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_depth(max_depth: usize) -> Self {
        Self {
            history: CommandHistory::with_max_depth(max_depth),
        }
    }

    /// Execute a command against the table. On success the captured
    /// inverse is recorded (clearing redo history) and the change scope
    /// is returned. On failure the table and both stacks are untouched.
    pub fn execute(
        &mut self,
        table: &mut Table,
        command: &Command,
    ) -> Result<TableChanged, CommandError> {
        let (inverse, changed) = apply(table, command)?;
        tracing::debug!(command = command.label(), "executed");
        self.history.record(inverse);
        Ok(changed)
    }

    /// Undo the most recent command. Returns `None` when there is nothing
    /// to undo (a no-op, not a failure).
    pub fn undo(&mut self, table: &mut Table) -> Option<TableChanged> {
        let inverse = self.history.pop_done()?;
        match apply(table, &inverse) {
            Ok((redo, changed)) => {
                tracing::debug!(command = inverse.label(), "undone");
                self.history.push_undone(redo);
                Some(changed)
            }
            Err(err) => {
                // A recorded inverse only fails if the table was mutated
                // behind the engine's back. Keep the entry so state stays
                // inspectable.
                tracing::warn!(command = inverse.label(), %err, "undo did not apply");
                self.history.push_done(inverse);
                None
            }
        }
    }

    /// Redo the most recently undone command. Returns `None` when there
    /// is nothing to redo.
    pub fn redo(&mut self, table: &mut Table) -> Option<TableChanged> {
        let redo = self.history.pop_undone()?;
        match apply(table, &redo) {
            Ok((inverse, changed)) => {
                tracing::debug!(command = redo.label(), "redone");
                self.history.push_done(inverse);
                Some(changed)
            }
            Err(err) => {
                tracing::warn!(command = redo.label(), %err, "redo did not apply");
                self.history.push_undone(redo);
                None
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Drop all history, e.g. when a fresh document is loaded.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Column, ColumnKind, Rule, RuleId};
    use crate::value::ValueType;

    fn table() -> Table {
        Table::with_columns(vec![
            Column::new("in", ColumnKind::Input, "In", ValueType::Number),
            Column::new("out", ColumnKind::Output, "Out", ValueType::String),
        ])
        .unwrap()
    }

    fn rule(id: &str, input: &str, output: &str) -> Rule {
        Rule::new(
            id,
            vec![
                Cell::new(input, ValueType::Number),
                Cell::new(output, ValueType::String),
            ],
        )
    }

    #[test]
    fn test_execute_undo_redo_cycle() {
        let mut table = table();
        let mut engine = CommandEngine::new();

        engine
            .execute(&mut table, &Command::insert_rule(rule("r1", "1", "a"), 0))
            .unwrap();
        let after_insert = table.clone();

        assert!(engine.undo(&mut table).is_some());
        assert_eq!(table.rule_count(), 0);
        assert!(engine.can_redo());

        assert!(engine.redo(&mut table).is_some());
        assert_eq!(table, after_insert);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut table = table();
        let mut engine = CommandEngine::new();
        assert_eq!(engine.undo(&mut table), None);
        assert_eq!(engine.redo(&mut table), None);
    }

    #[test]
    fn test_failed_execute_records_nothing() {
        let mut table = table();
        let mut engine = CommandEngine::new();

        let result = engine.execute(
            &mut table,
            &Command::RemoveRule {
                rule_id: RuleId::new("missing"),
            },
        );
        assert!(result.is_err());
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_execute_clears_redo() {
        let mut table = table();
        let mut engine = CommandEngine::new();

        engine
            .execute(&mut table, &Command::insert_rule(rule("r1", "1", "a"), 0))
            .unwrap();
        engine.undo(&mut table);
        assert!(engine.can_redo());

        engine
            .execute(&mut table, &Command::insert_rule(rule("r2", "2", "b"), 0))
            .unwrap();
        assert!(!engine.can_redo());
    }
}
