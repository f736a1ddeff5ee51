//! Directional and Tab/Enter navigation over the table grid.
//!
//! Arrow movement clamps at table edges (no wraparound). Tab/Enter
//! traversal is row-major: past the last column advances to column 0 of
//! the next row; past the last cell of the last row is a no-op.

use crate::model::Table;

use super::state::{CellRange, Selection};

impl Selection {
    /// Move the active cell by the given deltas, clamped to the table
    /// edges. Collapses any range. With no prior selection, movement
    /// starts from the first cell.
    pub fn move_by(&mut self, table: &Table, row_delta: i32, col_delta: i32) {
        if table.rule_count() == 0 || table.column_count() == 0 {
            return;
        }

        let (row, col) = self.position(table).unwrap_or((0, 0));
        let new_row = (row as i32 + row_delta)
            .max(0)
            .min(table.rule_count() as i32 - 1) as usize;
        let new_col = (col as i32 + col_delta)
            .max(0)
            .min(table.column_count() as i32 - 1) as usize;

        self.set_active_index(table, new_row, new_col);
        self.collapse_range();
    }

    /// Extend the range head by the given deltas (shift+arrow), clamped.
    /// The anchor is the existing range anchor, or the active cell when
    /// no range exists yet.
    pub fn extend_by(&mut self, table: &Table, row_delta: i32, col_delta: i32) {
        if table.rule_count() == 0 || table.column_count() == 0 {
            return;
        }
        let Some(anchor) = self.range_anchor() else {
            return;
        };

        let (row, col) = self
            .range()
            .and_then(|range| range.head.index_in(table))
            .or_else(|| self.position(table))
            .unwrap_or((0, 0));
        let new_row = (row as i32 + row_delta)
            .max(0)
            .min(table.rule_count() as i32 - 1) as usize;
        let new_col = (col as i32 + col_delta)
            .max(0)
            .min(table.column_count() as i32 - 1) as usize;

        let head = self.bind(table, new_row, new_col);
        self.set_range(CellRange::new(anchor, head));
    }

    /// Advance to the next cell in row-major order (Tab/Enter).
    pub fn next_cell(&mut self, table: &Table) {
        if table.rule_count() == 0 || table.column_count() == 0 {
            return;
        }
        self.collapse_range();

        let Some((row, col)) = self.position(table) else {
            self.set_active_index(table, 0, 0);
            return;
        };

        if col + 1 < table.column_count() {
            self.set_active_index(table, row, col + 1);
        } else if row + 1 < table.rule_count() {
            self.set_active_index(table, row + 1, 0);
        }
        // Past the last cell of the last row: stay put.
    }

    /// Step back to the previous cell in row-major order (Shift+Tab).
    pub fn prev_cell(&mut self, table: &Table) {
        if table.rule_count() == 0 || table.column_count() == 0 {
            return;
        }
        self.collapse_range();

        let Some((row, col)) = self.position(table) else {
            self.set_active_index(table, 0, 0);
            return;
        };

        if col > 0 {
            self.set_active_index(table, row, col - 1);
        } else if row > 0 {
            self.set_active_index(table, row - 1, table.column_count() - 1);
        }
    }
}
