//! Typed change notifications.
//!
//! One observer list per concern instead of a shared untyped bus. Events
//! are delivered synchronously, in registration order, within the same
//! turn as the mutation, so subscribers always observe a consistent
//! post-mutation table.

use crate::model::{ColumnId, RuleId};
use crate::selection::{CellRange, CellRef};

/// Scope of a structural change: which rules and columns a renderer needs
/// to repaint. Row operations name rule ids, column operations name
/// column ids, cell edits name both; table-level property changes carry
/// empty scopes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableChanged {
    pub affected_rule_ids: Vec<RuleId>,
    pub affected_column_ids: Vec<ColumnId>,
}

impl TableChanged {
    pub fn rules(ids: impl IntoIterator<Item = RuleId>) -> Self {
        Self {
            affected_rule_ids: ids.into_iter().collect(),
            affected_column_ids: Vec::new(),
        }
    }

    pub fn columns(ids: impl IntoIterator<Item = ColumnId>) -> Self {
        Self {
            affected_rule_ids: Vec::new(),
            affected_column_ids: ids.into_iter().collect(),
        }
    }

    pub fn cell(rule_id: RuleId, column_id: ColumnId) -> Self {
        Self {
            affected_rule_ids: vec![rule_id],
            affected_column_ids: vec![column_id],
        }
    }

    /// Union another scope into this one, preserving first-seen order.
    pub fn merge(&mut self, other: TableChanged) {
        for id in other.affected_rule_ids {
            if !self.affected_rule_ids.contains(&id) {
                self.affected_rule_ids.push(id);
            }
        }
        for id in other.affected_column_ids {
            if !self.affected_column_ids.contains(&id) {
                self.affected_column_ids.push(id);
            }
        }
    }
}

/// Snapshot of the selection after it moved or was re-resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionChanged {
    pub active: Option<CellRef>,
    pub range: Option<CellRange>,
}

/// An ordered list of subscribers for one event type.
///
/// Callbacks run synchronously in registration order; deterministic
/// ordering between subscribers is expressed by registering them in the
/// order they must run.
pub struct Observers<E> {
    callbacks: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn emit(&mut self, event: &E) {
        for callback in &mut self.callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
