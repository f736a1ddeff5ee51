//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use ruletable::{Cell, Column, ColumnKind, Rule, Table, TableEditor, ValueType};

/// The columns from the standard scenario: a number input and a string
/// output.
pub fn number_string_columns() -> Vec<Column> {
    vec![
        Column::new("in", ColumnKind::Input, "Amount", ValueType::Number),
        Column::new("out", ColumnKind::Output, "Result", ValueType::String),
    ]
}

/// Build a rule whose cells are typed per the given columns.
pub fn rule_for(columns: &[Column], id: &str, values: &[&str]) -> Rule {
    let cells = columns
        .iter()
        .zip(values)
        .map(|(column, raw)| Cell::new(*raw, column.value_type))
        .collect();
    Rule::new(id, cells)
}

/// A table over [`number_string_columns`] with one rule `{in: "1", out: "a"}`.
pub fn single_rule_table() -> Table {
    let columns = number_string_columns();
    let rules = vec![rule_for(&columns, "r1", &["1", "a"])];
    Table::from_parts(columns, rules).unwrap()
}

/// A five-rule table with distinct cell values per rule.
pub fn five_rule_table() -> Table {
    let columns = number_string_columns();
    let rules = (0..5)
        .map(|i| {
            let id = format!("r{}", i + 1);
            let input = (i + 1).to_string();
            let output = ["a", "b", "c", "d", "e"][i];
            rule_for(&columns, &id, &[&input, output])
        })
        .collect();
    Table::from_parts(columns, rules).unwrap()
}

/// An editor loaded with the given table.
pub fn editor_with(table: Table) -> TableEditor {
    let mut editor = TableEditor::new();
    editor.load(table);
    editor
}
