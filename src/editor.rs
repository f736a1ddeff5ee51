//! The editing composition root.
//!
//! A [`TableEditor`] *holds* the model, command engine, selection, and
//! editor registry and wires them by explicit construction — no service
//! lookup, no inheritance. Every mutation funnels through
//! [`execute`](TableEditor::execute); after each change the selection is
//! re-resolved first, then external subscribers are notified, all within
//! the same turn.

use crate::controllers::{ColumnReorder, ColumnResize, RowReorder};
use crate::editors::{EditSession, EditorRegistry, ExpressionLanguages, ExpressionLanguagesConfig};
use crate::engine::{Command, CommandEngine};
use crate::error::CommandError;
use crate::events::{Observers, SelectionChanged, TableChanged};
use crate::model::{ColumnId, ColumnKind, Rule, RuleId, Table};
use crate::selection::Selection;
use crate::value::ValueType;
use crate::viewer::TableView;

/// An in-progress cell edit bound to its rule.
#[derive(Debug)]
struct ActiveEdit {
    rule_id: RuleId,
    session: EditSession,
}

/// An editable decision table: model, command engine, selection, and
/// editor registry composed behind one surface.
pub struct TableEditor {
    table: Table,
    engine: CommandEngine,
    selection: Selection,
    registry: EditorRegistry,
    languages: ExpressionLanguages,
    resize: ColumnResize,
    change_observers: Observers<TableChanged>,
    selection_observers: Observers<SelectionChanged>,
    editing: Option<ActiveEdit>,
    next_id: u64,
}

impl Default for TableEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableEditor {
    /// An editor over an empty table with the default editor registry.
    pub fn new() -> Self {
        Self::with_config(ExpressionLanguagesConfig::default())
    }

    /// An editor configured with the given expression languages.
    pub fn with_config(config: ExpressionLanguagesConfig) -> Self {
        let languages = ExpressionLanguages::from_config(config);
        let registry = EditorRegistry::with_defaults(languages.clone());
        Self::compose(Table::new(), CommandEngine::new(), registry, languages)
    }

    /// Wire independently constructed parts together.
    pub fn compose(
        table: Table,
        engine: CommandEngine,
        registry: EditorRegistry,
        languages: ExpressionLanguages,
    ) -> Self {
        Self {
            table,
            engine,
            selection: Selection::new(),
            registry,
            languages,
            resize: ColumnResize::default(),
            change_observers: Observers::new(),
            selection_observers: Observers::new(),
            editing: None,
            next_id: 0,
        }
    }

    // === Document lifecycle ===

    /// Replace the whole table with a freshly imported document.
    ///
    /// Not undoable: both history stacks are cleared and the selection is
    /// reset, then a full-scope change event fires.
    pub fn load(&mut self, table: Table) {
        tracing::debug!(
            columns = table.column_count(),
            rules = table.rule_count(),
            "loading table"
        );
        let changed = TableChanged {
            affected_rule_ids: table.rules().iter().map(|r| r.id.clone()).collect(),
            affected_column_ids: table.columns().iter().map(|c| c.id.clone()).collect(),
        };

        let before = self.selection_snapshot();
        self.table = table;
        self.engine.clear();
        self.editing = None;
        self.selection.clear();
        self.change_observers.emit(&changed);
        self.emit_selection_if_changed(before);
    }

    // === Commands ===

    /// Execute a command. On failure the model, history, and selection
    /// are untouched. An open cell-edit session is discarded either way
    /// a structural change lands.
    pub fn execute(&mut self, command: Command) -> Result<(), CommandError> {
        let changed = self.engine.execute(&mut self.table, &command)?;
        self.after_change(changed);
        Ok(())
    }

    /// Undo the most recent command. Returns false when there was
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.engine.undo(&mut self.table) {
            Some(changed) => {
                self.after_change(changed);
                true
            }
            None => false,
        }
    }

    /// Redo the most recently undone command. Returns false when there
    /// was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.engine.redo(&mut self.table) {
            Some(changed) => {
                self.after_change(changed);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.engine.can_redo()
    }

    // === Convenience mutations ===

    /// Append a blank rule at the end of the table.
    pub fn add_rule(&mut self) -> Result<RuleId, CommandError> {
        let index = self.table.rule_count();
        self.add_rule_at(index)
    }

    /// Insert a blank rule at the given index.
    pub fn add_rule_at(&mut self, index: usize) -> Result<RuleId, CommandError> {
        let id = self.fresh_rule_id();
        let rule = Rule::blank(id.clone(), self.table.column_count());
        self.execute(Command::insert_rule(rule, index))?;
        Ok(id)
    }

    /// Insert a fresh unlabeled column at the given index.
    pub fn add_column(
        &mut self,
        kind: ColumnKind,
        value_type: ValueType,
        index: usize,
    ) -> Result<ColumnId, CommandError> {
        let id = self.fresh_column_id(kind);
        let column = crate::model::Column::new(id.clone(), kind, "", value_type);
        self.execute(Command::insert_column(column, index))?;
        Ok(id)
    }

    // === Selection ===

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Select a cell by ids, collapsing any range.
    pub fn select(
        &mut self,
        rule_id: impl Into<RuleId>,
        column_id: impl Into<ColumnId>,
    ) -> bool {
        let before = self.selection_snapshot();
        let moved = self.selection.move_to(&self.table, rule_id, column_id);
        self.emit_selection_if_changed(before);
        moved
    }

    /// Move the active cell by deltas, clamped at table edges.
    pub fn move_selection(&mut self, row_delta: i32, col_delta: i32) {
        let before = self.selection_snapshot();
        self.selection.move_by(&self.table, row_delta, col_delta);
        self.emit_selection_if_changed(before);
    }

    /// Extend the selection range to a cell (shift-click).
    pub fn extend_selection_to(
        &mut self,
        rule_id: impl Into<RuleId>,
        column_id: impl Into<ColumnId>,
    ) -> bool {
        let before = self.selection_snapshot();
        let extended = self.selection.extend_to(&self.table, rule_id, column_id);
        self.emit_selection_if_changed(before);
        extended
    }

    /// Extend the selection range by deltas (shift-arrow).
    pub fn extend_selection_by(&mut self, row_delta: i32, col_delta: i32) {
        let before = self.selection_snapshot();
        self.selection.extend_by(&self.table, row_delta, col_delta);
        self.emit_selection_if_changed(before);
    }

    pub fn select_all(&mut self) {
        let before = self.selection_snapshot();
        self.selection.select_all(&self.table);
        self.emit_selection_if_changed(before);
    }

    /// Advance to the next cell in row-major order (Tab/Enter).
    pub fn next_cell(&mut self) {
        let before = self.selection_snapshot();
        self.selection.next_cell(&self.table);
        self.emit_selection_if_changed(before);
    }

    /// Step back to the previous cell (Shift+Tab).
    pub fn prev_cell(&mut self) {
        let before = self.selection_snapshot();
        self.selection.prev_cell(&self.table);
        self.emit_selection_if_changed(before);
    }

    // === Cell editing ===

    /// Open an editing session on a cell through the registry.
    pub fn begin_edit(
        &mut self,
        rule_id: impl Into<RuleId>,
        column_id: impl Into<ColumnId>,
    ) -> Result<&EditSession, CommandError> {
        let rule_id = rule_id.into();
        let column_id = column_id.into();

        let column = self
            .table
            .column(&column_id)
            .ok_or_else(|| CommandError::UnknownColumn(column_id.clone()))?;
        let cell = self
            .table
            .cell(&rule_id, &column_id)
            .ok_or_else(|| CommandError::UnknownRule(rule_id.clone()))?;
        let editor = self
            .registry
            .resolve(column)
            .ok_or_else(|| CommandError::NoEditor(column_id.clone()))?;

        tracing::trace!(editor = editor.name(), %rule_id, %column_id, "edit session opened");
        let session = editor.open(cell, column);
        let edit = self.editing.insert(ActiveEdit { rule_id, session });
        Ok(&edit.session)
    }

    /// The in-progress session, if a cell is being edited.
    pub fn editing_session(&self) -> Option<&EditSession> {
        self.editing.as_ref().map(|edit| &edit.session)
    }

    /// Mutable access for the widget driving the session.
    pub fn editing_session_mut(&mut self) -> Option<&mut EditSession> {
        self.editing.as_mut().map(|edit| &mut edit.session)
    }

    /// Commit the in-progress session through its editor and the command
    /// engine. Returns true when a command was executed; an unmodified
    /// buffer (or no open session) commits nothing.
    pub fn commit_edit(&mut self) -> Result<bool, CommandError> {
        let Some(ActiveEdit { rule_id, session }) = self.editing.take() else {
            return Ok(false);
        };
        let column_id = session.column_id().clone();

        let raw = {
            let column = self
                .table
                .column(&column_id)
                .ok_or_else(|| CommandError::UnknownColumn(column_id.clone()))?;
            let editor = self
                .registry
                .resolve(column)
                .ok_or_else(|| CommandError::NoEditor(column_id.clone()))?;
            editor.commit(session)
        };

        let unchanged = self
            .table
            .cell(&rule_id, &column_id)
            .map(|cell| cell.raw() == raw)
            .unwrap_or(false);
        if unchanged {
            return Ok(false);
        }

        self.execute(Command::SetCellValue {
            rule_id,
            column_id,
            value: raw,
        })?;
        Ok(true)
    }

    /// Discard the in-progress session without validation and without
    /// emitting any command.
    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.editing.take() {
            if let Some(column) = self.table.column(edit.session.column_id()) {
                if let Some(editor) = self.registry.resolve(column) {
                    editor.cancel(edit.session);
                }
            }
        }
    }

    // === Reorder & resize ===

    /// Drop the rule at `from` onto candidate index `to`. Returns true
    /// when a move was executed, false for a rejected no-op.
    pub fn drag_rule(&mut self, from: usize, to: usize) -> Result<bool, CommandError> {
        match RowReorder::drop_intent(&self.table, from, to) {
            Some(command) => {
                self.execute(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the column at `from` onto candidate index `to`.
    pub fn drag_column(&mut self, from: usize, to: usize) -> Result<bool, CommandError> {
        match ColumnReorder::drop_intent(&self.table, from, to) {
            Some(command) => {
                self.execute(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Commit an end-of-gesture column resize, clamped to the minimum
    /// width.
    pub fn resize_column(&mut self, column_id: &ColumnId, width: u32) -> Result<bool, CommandError> {
        match self.resize.resize_intent(&self.table, column_id, width) {
            Some(command) => {
                self.execute(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // === Events ===

    /// Subscribe to structural changes. Subscribers run synchronously in
    /// registration order, after the selection has re-resolved.
    pub fn on_change(&mut self, callback: impl FnMut(&TableChanged) + 'static) {
        self.change_observers.subscribe(callback);
    }

    /// Subscribe to selection changes, e.g. for toolbar enablement.
    pub fn on_selection_change(&mut self, callback: impl FnMut(&SelectionChanged) + 'static) {
        self.selection_observers.subscribe(callback);
    }

    /// The configured expression languages.
    pub fn languages(&self) -> &ExpressionLanguages {
        &self.languages
    }

    // === Internals ===

    fn after_change(&mut self, changed: TableChanged) {
        // A structural change invalidates any open edit session.
        self.editing = None;

        let before = self.selection_snapshot();
        self.selection.resolve(&self.table);
        self.change_observers.emit(&changed);
        self.emit_selection_if_changed(before);
    }

    fn selection_snapshot(&self) -> SelectionChanged {
        SelectionChanged {
            active: self.selection.active_cell().cloned(),
            range: self.selection.range().cloned(),
        }
    }

    fn emit_selection_if_changed(&mut self, before: SelectionChanged) {
        let now = self.selection_snapshot();
        if now != before {
            self.selection_observers.emit(&now);
        }
    }

    fn fresh_rule_id(&mut self) -> RuleId {
        loop {
            self.next_id += 1;
            let id = RuleId::new(format!("rule_{}", self.next_id));
            if self.table.rule(&id).is_none() {
                return id;
            }
        }
    }

    fn fresh_column_id(&mut self, kind: ColumnKind) -> ColumnId {
        loop {
            self.next_id += 1;
            let id = ColumnId::new(format!("{}_{}", kind.name(), self.next_id));
            if self.table.column(&id).is_none() {
                return id;
            }
        }
    }
}

impl TableView for TableEditor {
    fn table(&self) -> &Table {
        &self.table
    }
}

impl std::fmt::Debug for TableEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableEditor")
            .field("columns", &self.table.column_count())
            .field("rules", &self.table.rule_count())
            .field("undo_depth", &self.engine.undo_depth())
            .field("redo_depth", &self.engine.redo_depth())
            .field("editing", &self.editing.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn editor() -> TableEditor {
        let mut editor = TableEditor::new();
        editor.load(
            Table::with_columns(vec![
                Column::new("in", ColumnKind::Input, "In", ValueType::Number),
                Column::new("out", ColumnKind::Output, "Out", ValueType::String),
            ])
            .unwrap(),
        );
        editor
    }

    #[test]
    fn test_load_clears_history() {
        let mut editor = editor();
        editor.add_rule().unwrap();
        assert!(editor.can_undo());

        editor.load(Table::new());
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
        assert!(editor.selection().active_cell().is_none());
    }

    #[test]
    fn test_add_rule_allocates_unique_ids() {
        let mut editor = editor();
        let first = editor.add_rule().unwrap();
        let second = editor.add_rule().unwrap();
        assert_ne!(first, second);
        assert_eq!(editor.rules().len(), 2);
    }

    #[test]
    fn test_structural_change_discards_edit_session() {
        let mut editor = editor();
        let rule = editor.add_rule().unwrap();
        editor.begin_edit(rule.clone(), "in").unwrap();
        assert!(editor.editing_session().is_some());

        editor.add_rule().unwrap();
        assert!(editor.editing_session().is_none());
    }

    #[test]
    fn test_commit_without_modification_executes_nothing() {
        let mut editor = editor();
        let rule = editor.add_rule().unwrap();
        let undo_depth_before = editor.engine.undo_depth();

        editor.begin_edit(rule, "in").unwrap();
        let committed = editor.commit_edit().unwrap();
        assert!(!committed);
        assert_eq!(editor.engine.undo_depth(), undo_depth_before);
    }
}
