//! Rules (table rows).

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Stable identifier for a rule. Survives reorders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One row of the table: an ordered run of cells, one per column.
///
/// The table enforces the cell-per-column invariant; a rule on its own is
/// just a candidate until it is inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub id: RuleId,
    cells: Vec<Cell>,
}

impl Rule {
    pub fn new(id: impl Into<RuleId>, cells: Vec<Cell>) -> Self {
        Self {
            id: id.into(),
            cells,
        }
    }

    /// A rule of empty cells, one per column.
    pub fn blank(id: impl Into<RuleId>, column_count: usize) -> Self {
        Self {
            id: id.into(),
            cells: vec![Cell::empty(); column_count],
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub(crate) fn insert_cell(&mut self, index: usize, cell: Cell) {
        self.cells.insert(index, cell);
    }

    pub(crate) fn remove_cell(&mut self, index: usize) -> Cell {
        self.cells.remove(index)
    }

    pub(crate) fn move_cell(&mut self, from: usize, to: usize) {
        let cell = self.cells.remove(from);
        self.cells.insert(to, cell);
    }
}
