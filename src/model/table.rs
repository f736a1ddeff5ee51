//! The table aggregate.
//!
//! Owns the ordered columns and rules exclusively and enforces the
//! structural invariant that every rule carries exactly one cell per
//! column, in column order, at every observable point. All mutation
//! methods validate first and apply second — a rejected mutation leaves
//! the table untouched. They are crate-private on purpose: outside the
//! crate, every change goes through a command.

use serde::Serialize;

use crate::error::CommandError;
use crate::value::ValueType;

use super::cell::Cell;
use super::column::{Column, ColumnId};
use super::rule::{Rule, RuleId};

/// Default hit policy for new tables.
pub const DEFAULT_HIT_POLICY: &str = "UNIQUE";

/// A decision table: ordered columns, ordered rules, and table-level
/// properties. The single source of truth for structure and cell content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    name: String,
    hit_policy: String,
    columns: Vec<Column>,
    rules: Vec<Rule>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// An empty table with no columns and no rules.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            hit_policy: DEFAULT_HIT_POLICY.to_string(),
            columns: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// A table with the given columns and no rules. Rejects duplicate
    /// column ids.
    pub fn with_columns(columns: Vec<Column>) -> Result<Self, CommandError> {
        let mut table = Self::new();
        for column in columns {
            let index = table.columns.len();
            table.insert_column(column, None, index)?;
        }
        Ok(table)
    }

    /// Build a table wholesale from imported columns and rules,
    /// validating the structural invariant up front. This is the
    /// construction path for the external import layer; a live table is
    /// only ever mutated through commands.
    pub fn from_parts(columns: Vec<Column>, rules: Vec<Rule>) -> Result<Self, CommandError> {
        let mut table = Self::with_columns(columns)?;
        for (index, rule) in rules.into_iter().enumerate() {
            table.insert_rule(rule, index)?;
        }
        Ok(table)
    }

    /// Set the table name at construction time.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the hit policy at construction time.
    pub fn with_hit_policy(mut self, hit_policy: impl Into<String>) -> Self {
        self.hit_policy = hit_policy.into();
        self
    }

    // === Queries ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hit_policy(&self) -> &str {
        &self.hit_policy
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn rule(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    pub fn rule_index(&self, id: &RuleId) -> Option<usize> {
        self.rules.iter().position(|r| &r.id == id)
    }

    /// The cell at (rule, column), if both ids exist.
    pub fn cell(&self, rule_id: &RuleId, column_id: &ColumnId) -> Option<&Cell> {
        let column_index = self.column_index(column_id)?;
        self.rule(rule_id)?.cell(column_index)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rules.is_empty()
    }

    // === Mutation bodies (run by commands) ===

    /// Insert a column at `index`. Every rule gains a cell at the same
    /// position: a default empty cell, or — when undoing a removal — the
    /// captured cells, one per rule in rule order.
    pub(crate) fn insert_column(
        &mut self,
        column: Column,
        cells: Option<Vec<Cell>>,
        index: usize,
    ) -> Result<(), CommandError> {
        if index > self.columns.len() {
            return Err(CommandError::IndexOutOfRange {
                index,
                max: self.columns.len(),
            });
        }
        if self.column(&column.id).is_some() {
            return Err(CommandError::DuplicateId(column.id.to_string()));
        }
        if let Some(cells) = &cells {
            if cells.len() != self.rules.len() {
                return Err(CommandError::StructuralMismatch {
                    entity: format!("column {}", column.id),
                    actual: cells.len(),
                    expected: self.rules.len(),
                });
            }
        }

        let value_type = column.value_type;
        self.columns.insert(index, column);
        match cells {
            Some(cells) => {
                for (rule, mut cell) in self.rules.iter_mut().zip(cells) {
                    cell.revalidate(value_type);
                    rule.insert_cell(index, cell);
                }
            }
            None => {
                for rule in &mut self.rules {
                    rule.insert_cell(index, Cell::empty());
                }
            }
        }
        Ok(())
    }

    /// Remove a column and excise its cell from every rule. Returns the
    /// column, its former index, and the removed cells so the inverse can
    /// restore them.
    pub(crate) fn remove_column(
        &mut self,
        id: &ColumnId,
    ) -> Result<(Column, usize, Vec<Cell>), CommandError> {
        let index = self
            .column_index(id)
            .ok_or_else(|| CommandError::UnknownColumn(id.clone()))?;

        let column = self.columns.remove(index);
        let cells = self
            .rules
            .iter_mut()
            .map(|rule| rule.remove_cell(index))
            .collect();
        Ok((column, index, cells))
    }

    /// Insert a rule at `index`. The rule must already carry one cell per
    /// column; its cells are revalidated against the column types so the
    /// cache can never disagree with the declared types.
    pub(crate) fn insert_rule(&mut self, mut rule: Rule, index: usize) -> Result<(), CommandError> {
        if rule.cell_count() != self.columns.len() {
            return Err(CommandError::StructuralMismatch {
                entity: format!("rule {}", rule.id),
                actual: rule.cell_count(),
                expected: self.columns.len(),
            });
        }
        if index > self.rules.len() {
            return Err(CommandError::IndexOutOfRange {
                index,
                max: self.rules.len(),
            });
        }
        if self.rule(&rule.id).is_some() {
            return Err(CommandError::DuplicateId(rule.id.to_string()));
        }

        for (cell_index, column) in self.columns.iter().enumerate() {
            if let Some(cell) = rule.cell_mut(cell_index) {
                cell.revalidate(column.value_type);
            }
        }
        self.rules.insert(index, rule);
        Ok(())
    }

    /// Remove a rule, returning it and its former index.
    pub(crate) fn remove_rule(&mut self, id: &RuleId) -> Result<(Rule, usize), CommandError> {
        let index = self
            .rule_index(id)
            .ok_or_else(|| CommandError::UnknownRule(id.clone()))?;
        Ok((self.rules.remove(index), index))
    }

    /// Reorder a column in place, carrying every rule's cell along.
    /// Returns the original index, making the operation its own inverse
    /// at that index. Identities are untouched; referencing state never
    /// has to regenerate.
    pub(crate) fn move_column(
        &mut self,
        id: &ColumnId,
        to_index: usize,
    ) -> Result<usize, CommandError> {
        let from = self
            .column_index(id)
            .ok_or_else(|| CommandError::UnknownColumn(id.clone()))?;
        if to_index >= self.columns.len() {
            return Err(CommandError::IndexOutOfRange {
                index: to_index,
                max: self.columns.len().saturating_sub(1),
            });
        }
        if from != to_index {
            let column = self.columns.remove(from);
            self.columns.insert(to_index, column);
            for rule in &mut self.rules {
                rule.move_cell(from, to_index);
            }
        }
        Ok(from)
    }

    /// Reorder a rule in place. Returns the original index.
    pub(crate) fn move_rule(&mut self, id: &RuleId, to_index: usize) -> Result<usize, CommandError> {
        let from = self
            .rule_index(id)
            .ok_or_else(|| CommandError::UnknownRule(id.clone()))?;
        if to_index >= self.rules.len() {
            return Err(CommandError::IndexOutOfRange {
                index: to_index,
                max: self.rules.len().saturating_sub(1),
            });
        }
        if from != to_index {
            let rule = self.rules.remove(from);
            self.rules.insert(to_index, rule);
        }
        Ok(from)
    }

    /// Set a cell's raw text and revalidate it against the owning
    /// column's type. Unparsable text is recorded as cell status, never
    /// rejected. Returns the previous raw text.
    pub(crate) fn set_cell_value(
        &mut self,
        rule_id: &RuleId,
        column_id: &ColumnId,
        raw: String,
    ) -> Result<String, CommandError> {
        let column_index = self
            .column_index(column_id)
            .ok_or_else(|| CommandError::UnknownColumn(column_id.clone()))?;
        let value_type = self.columns[column_index].value_type;
        let rule_index = self
            .rule_index(rule_id)
            .ok_or_else(|| CommandError::UnknownRule(rule_id.clone()))?;

        let cell = self.rules[rule_index]
            .cell_mut(column_index)
            .ok_or_else(|| CommandError::UnknownColumn(column_id.clone()))?;
        let previous = cell.raw().to_string();
        cell.set_raw(raw, value_type);
        Ok(previous)
    }

    /// Set a column's display width. Returns the previous width.
    pub(crate) fn set_column_width(
        &mut self,
        id: &ColumnId,
        width: u32,
    ) -> Result<u32, CommandError> {
        let column = self
            .column_mut(id)
            .ok_or_else(|| CommandError::UnknownColumn(id.clone()))?;
        let previous = column.width;
        column.width = width;
        Ok(previous)
    }

    /// Set a column's display label. Returns the previous label.
    pub(crate) fn set_column_label(
        &mut self,
        id: &ColumnId,
        label: String,
    ) -> Result<String, CommandError> {
        let column = self
            .column_mut(id)
            .ok_or_else(|| CommandError::UnknownColumn(id.clone()))?;
        Ok(std::mem::replace(&mut column.label, label))
    }

    /// Change a column's declared type and revalidate every cell in the
    /// column. Returns the previous type.
    pub(crate) fn set_column_type(
        &mut self,
        id: &ColumnId,
        value_type: ValueType,
    ) -> Result<ValueType, CommandError> {
        let index = self
            .column_index(id)
            .ok_or_else(|| CommandError::UnknownColumn(id.clone()))?;
        let previous = std::mem::replace(&mut self.columns[index].value_type, value_type);
        for rule in &mut self.rules {
            if let Some(cell) = rule.cell_mut(index) {
                cell.revalidate(value_type);
            }
        }
        Ok(previous)
    }

    /// Set the table name. Returns the previous name.
    pub(crate) fn set_name(&mut self, name: String) -> String {
        std::mem::replace(&mut self.name, name)
    }

    /// Set the hit policy (an opaque string; evaluation semantics live
    /// elsewhere). Returns the previous policy.
    pub(crate) fn set_hit_policy(&mut self, hit_policy: String) -> String {
        std::mem::replace(&mut self.hit_policy, hit_policy)
    }

    fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }
}
