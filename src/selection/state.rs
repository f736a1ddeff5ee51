//! Selection state: the active cell and an optional anchor/head range.

use serde::{Deserialize, Serialize};

use crate::model::{ColumnId, RuleId, Table};

/// A cell coordinate by stable ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub rule_id: RuleId,
    pub column_id: ColumnId,
}

impl CellRef {
    pub fn new(rule_id: impl Into<RuleId>, column_id: impl Into<ColumnId>) -> Self {
        Self {
            rule_id: rule_id.into(),
            column_id: column_id.into(),
        }
    }

    /// Resolve to (rule index, column index) against the current table.
    pub fn index_in(&self, table: &Table) -> Option<(usize, usize)> {
        Some((
            table.rule_index(&self.rule_id)?,
            table.column_index(&self.column_id)?,
        ))
    }
}

/// An anchor/head pair of cell coordinates. The anchor stays fixed while
/// the head moves during range extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub anchor: CellRef,
    pub head: CellRef,
}

impl CellRange {
    pub fn new(anchor: CellRef, head: CellRef) -> Self {
        Self { anchor, head }
    }

    /// Normalized (top-left, bottom-right) index bounds, if both
    /// endpoints resolve.
    pub fn bounds(&self, table: &Table) -> Option<((usize, usize), (usize, usize))> {
        let (ar, ac) = self.anchor.index_in(table)?;
        let (hr, hc) = self.head.index_in(table)?;
        Some(((ar.min(hr), ac.min(hc)), (ar.max(hr), ac.max(hc))))
    }

    /// Whether the cell at the given indices falls inside the range.
    pub fn contains_index(&self, table: &Table, rule_index: usize, column_index: usize) -> bool {
        match self.bounds(table) {
            Some(((top, left), (bottom, right))) => {
                rule_index >= top
                    && rule_index <= bottom
                    && column_index >= left
                    && column_index <= right
            }
            None => false,
        }
    }
}

/// The selection: a derived view into the current table, never
/// authoritative. After every structural change it must be re-resolved
/// via [`Selection::resolve`] so it can never point at a removed rule or
/// column.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    active: Option<CellRef>,
    range: Option<CellRange>,
    /// Last resolved position of the active cell. When the referenced id
    /// disappears, the selection rebinds to the cell now occupying this
    /// positional index.
    last_index: Option<(usize, usize)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_cell(&self) -> Option<&CellRef> {
        self.active.as_ref()
    }

    pub fn range(&self) -> Option<&CellRange> {
        self.range.as_ref()
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.range = None;
        self.last_index = None;
    }

    /// Select the given cell, collapsing any range. Returns false (and
    /// changes nothing) if either id does not exist.
    pub fn move_to(
        &mut self,
        table: &Table,
        rule_id: impl Into<RuleId>,
        column_id: impl Into<ColumnId>,
    ) -> bool {
        let target = CellRef::new(rule_id, column_id);
        match target.index_in(table) {
            Some(index) => {
                self.active = Some(target);
                self.last_index = Some(index);
                self.range = None;
                true
            }
            None => false,
        }
    }

    /// Extend (or start) a range from the active cell to the given cell,
    /// leaving the active cell in place. Returns false if either id does
    /// not exist or there is no active cell to anchor on.
    pub fn extend_to(
        &mut self,
        table: &Table,
        rule_id: impl Into<RuleId>,
        column_id: impl Into<ColumnId>,
    ) -> bool {
        let head = CellRef::new(rule_id, column_id);
        if head.index_in(table).is_none() {
            return false;
        }
        let anchor = match (&self.range, &self.active) {
            (Some(range), _) => range.anchor.clone(),
            (None, Some(active)) => active.clone(),
            (None, None) => return false,
        };
        self.range = Some(CellRange::new(anchor, head));
        true
    }

    /// Select the whole table as a range. The active cell becomes the
    /// first cell if nothing was active.
    pub fn select_all(&mut self, table: &Table) {
        if table.rule_count() == 0 || table.column_count() == 0 {
            self.range = None;
            return;
        }
        let first = self.bind(table, 0, 0);
        let last = self.bind(table, table.rule_count() - 1, table.column_count() - 1);
        if self.active.is_none() {
            self.last_index = Some((0, 0));
            self.active = Some(first.clone());
        }
        self.range = Some(CellRange::new(first, last));
    }

    /// Re-resolve stored coordinates against the current table.
    ///
    /// An active cell whose rule or column id vanished collapses to the
    /// cell now occupying the same positional index (per axis, the
    /// surviving id wins over the cached index), or to none if the table
    /// has no cells left. A range with a vanished endpoint is dropped.
    pub fn resolve(&mut self, table: &Table) {
        if let Some(active) = &self.active {
            let rule_index = table.rule_index(&active.rule_id);
            let column_index = table.column_index(&active.column_id);
            match (rule_index, column_index) {
                (Some(r), Some(c)) => {
                    self.last_index = Some((r, c));
                }
                _ => {
                    if table.rule_count() == 0 || table.column_count() == 0 {
                        self.active = None;
                        self.last_index = None;
                    } else {
                        let (cached_r, cached_c) = self.last_index.unwrap_or((0, 0));
                        let r = rule_index.unwrap_or(cached_r).min(table.rule_count() - 1);
                        let c = column_index
                            .unwrap_or(cached_c)
                            .min(table.column_count() - 1);
                        self.active = Some(self.bind(table, r, c));
                        self.last_index = Some((r, c));
                    }
                }
            }
        }

        if let Some(range) = &self.range {
            if range.anchor.index_in(table).is_none() || range.head.index_in(table).is_none() {
                self.range = None;
            }
        }
    }

    /// Current position of the active cell, falling back to the cached
    /// index when nothing is active.
    pub(super) fn position(&self, table: &Table) -> Option<(usize, usize)> {
        self.active
            .as_ref()
            .and_then(|active| active.index_in(table))
            .or(self.last_index)
    }

    pub(super) fn bind(&self, table: &Table, rule_index: usize, column_index: usize) -> CellRef {
        CellRef {
            rule_id: table.rules()[rule_index].id.clone(),
            column_id: table.columns()[column_index].id.clone(),
        }
    }

    pub(super) fn set_active_index(&mut self, table: &Table, rule_index: usize, column_index: usize) {
        self.active = Some(self.bind(table, rule_index, column_index));
        self.last_index = Some((rule_index, column_index));
    }

    pub(super) fn collapse_range(&mut self) {
        self.range = None;
    }

    pub(super) fn range_anchor(&self) -> Option<CellRef> {
        match (&self.range, &self.active) {
            (Some(range), _) => Some(range.anchor.clone()),
            (None, Some(active)) => Some(active.clone()),
            (None, None) => None,
        }
    }

    pub(super) fn set_range(&mut self, range: CellRange) {
        self.range = Some(range);
    }
}
