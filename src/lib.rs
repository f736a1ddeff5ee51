//! Ruletable - embeddable decision-table editing core
//!
//! This crate provides the editing model behind a decision-table editor:
//! a structural [`model`] (columns, rules, typed cells), a reversible
//! [`engine`] with lossless undo/redo, a [`selection`] state machine that
//! can never dangle, per-type cell [`editors`], and the reorder/resize
//! [`controllers`]. Rendering, serialization, and pointer capture live in
//! the embedding application.
//!
//! ```
//! use ruletable::{Column, ColumnKind, Command, Table, TableEditor, TableView, ValueType};
//!
//! let mut editor = TableEditor::new();
//! editor.load(
//!     Table::with_columns(vec![
//!         Column::new("in", ColumnKind::Input, "Amount", ValueType::Number),
//!         Column::new("out", ColumnKind::Output, "Result", ValueType::String),
//!     ])
//!     .unwrap(),
//! );
//!
//! let rule = editor.add_rule().unwrap();
//! editor.execute(Command::set_cell_value(rule.clone(), "in", "42")).unwrap();
//! assert_eq!(editor.cell(&rule, &"in".into()).unwrap().raw(), "42");
//!
//! editor.undo();
//! assert!(editor.cell(&rule, &"in".into()).unwrap().raw().is_empty());
//! ```

pub mod controllers;
pub mod editors;
pub mod engine;
pub mod error;
pub mod events;
pub mod model;
pub mod selection;
pub mod value;

mod editor;
mod viewer;

// Re-export commonly used types
pub use editor::TableEditor;
pub use editors::{
    CellEditor, EditSession, EditorRegistry, ExpressionEditor, ExpressionLanguages,
    ExpressionLanguagesConfig, LanguageContext, LanguageDefaults, LanguageOption, SimpleEditor,
};
pub use engine::{Command, CommandEngine, CommandHistory};
pub use error::CommandError;
pub use events::{Observers, SelectionChanged, TableChanged};
pub use model::{
    Cell, CellStatus, Column, ColumnId, ColumnKind, Rule, RuleId, Table, DEFAULT_COLUMN_WIDTH,
    MIN_COLUMN_WIDTH,
};
pub use selection::{CellRange, CellRef, Selection};
pub use value::{IsoDuration, ParsedValue, ValueType};
pub use viewer::{TableView, TableViewer};
