//! Read-only table viewing.

use crate::model::{Cell, Column, ColumnId, Rule, RuleId, Table};

/// Read-only query surface over a decision table.
///
/// Rendering layers depend on this trait only; both the plain viewer and
/// the editor implement it, so a view component works unchanged against
/// either.
pub trait TableView {
    fn table(&self) -> &Table;

    fn columns(&self) -> &[Column] {
        self.table().columns()
    }

    fn rules(&self) -> &[Rule] {
        self.table().rules()
    }

    fn cell(&self, rule_id: &RuleId, column_id: &ColumnId) -> Option<&Cell> {
        self.table().cell(rule_id, column_id)
    }
}

/// Displays a table without any editing capability.
#[derive(Debug, Clone, Default)]
pub struct TableViewer {
    table: Table,
}

impl TableViewer {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Replace the displayed table.
    pub fn open(&mut self, table: Table) {
        self.table = table;
    }
}

impl TableView for TableViewer {
    fn table(&self) -> &Table {
        &self.table
    }
}
