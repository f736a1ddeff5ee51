//! Cell editing sessions, per-type validation, and editor resolution

mod common;

use common::{editor_with, single_rule_table};
use ruletable::{
    CellStatus, Column, ColumnKind, Command, ExpressionLanguagesConfig, LanguageContext,
    LanguageDefaults, LanguageOption, Rule, Table, TableEditor, TableView, ValueType,
};

fn typed_table() -> Table {
    let columns = vec![
        Column::new("when", ColumnKind::Input, "When", ValueType::Date),
        Column::new("amount", ColumnKind::Input, "Amount", ValueType::Number),
        Column::new("result", ColumnKind::Output, "Result", ValueType::String),
    ];
    Table::from_parts(columns, vec![Rule::blank("r1", 3)]).unwrap()
}

// ========================================================================
// Session lifecycle
// ========================================================================

#[test]
fn test_commit_flows_through_command_engine() {
    let mut editor = editor_with(single_rule_table());

    editor.begin_edit("r1", "out").unwrap();
    editor.editing_session_mut().unwrap().set_text("b");
    let committed = editor.commit_edit().unwrap();

    assert!(committed);
    assert!(editor.editing_session().is_none());
    assert_eq!(editor.cell(&"r1".into(), &"out".into()).unwrap().raw(), "b");

    // The edit is a single undoable command.
    assert!(editor.undo());
    assert_eq!(editor.cell(&"r1".into(), &"out".into()).unwrap().raw(), "a");
}

#[test]
fn test_cancel_discards_without_touching_model() {
    let mut editor = editor_with(single_rule_table());

    editor.begin_edit("r1", "out").unwrap();
    editor.editing_session_mut().unwrap().set_text("discarded");
    editor.cancel_edit();

    assert!(editor.editing_session().is_none());
    assert_eq!(editor.cell(&"r1".into(), &"out".into()).unwrap().raw(), "a");
    assert!(!editor.can_undo());
}

#[test]
fn test_session_is_seeded_with_current_raw_text() {
    let mut editor = editor_with(single_rule_table());

    let session = editor.begin_edit("r1", "in").unwrap();
    assert_eq!(session.text(), "1");
    assert_eq!(session.original(), "1");
    assert!(!session.is_modified());
}

#[test]
fn test_begin_edit_on_unknown_ids_fails() {
    let mut editor = editor_with(single_rule_table());
    assert!(editor.begin_edit("missing", "in").is_err());
    assert!(editor.begin_edit("r1", "missing").is_err());
    assert!(editor.editing_session().is_none());
}

// ========================================================================
// Validation
// ========================================================================

#[test]
fn test_unparsable_date_is_recorded_not_rejected() {
    let mut editor = editor_with(typed_table());

    editor
        .execute(Command::set_cell_value("r1", "when", "next tuesday"))
        .unwrap();

    let cell = editor.cell(&"r1".into(), &"when".into()).unwrap();
    assert_eq!(cell.raw(), "next tuesday");
    assert!(matches!(cell.status(), CellStatus::Invalid { .. }));
    assert!(cell.parsed().is_none());
}

#[test]
fn test_committed_text_is_validated_by_the_model() {
    let mut editor = editor_with(typed_table());

    // The editor contract returns raw text; the model decides validity.
    editor.begin_edit("r1", "amount").unwrap();
    editor.editing_session_mut().unwrap().set_text("not a number");
    editor.commit_edit().unwrap();

    let cell = editor.cell(&"r1".into(), &"amount".into()).unwrap();
    assert_eq!(cell.raw(), "not a number");
    assert!(!cell.is_valid());

    editor.begin_edit("r1", "amount").unwrap();
    editor.editing_session_mut().unwrap().set_text("12.5");
    editor.commit_edit().unwrap();
    assert!(editor.cell(&"r1".into(), &"amount".into()).unwrap().is_valid());
}

#[test]
fn test_valid_date_parses_on_commit() {
    let mut editor = editor_with(typed_table());

    editor.begin_edit("r1", "when").unwrap();
    editor.editing_session_mut().unwrap().set_text("2026-08-05");
    editor.commit_edit().unwrap();

    let cell = editor.cell(&"r1".into(), &"when".into()).unwrap();
    assert!(cell.is_valid());
    assert!(cell.parsed().is_some());
}

// ========================================================================
// Editor resolution
// ========================================================================

#[test]
fn test_simple_mode_column_gets_untagged_session() {
    let mut editor = editor_with(typed_table());
    let session = editor.begin_edit("r1", "when").unwrap();
    // A simple-mode editor claimed the column; no language tag.
    assert!(session.language().is_none());
}

#[test]
fn test_non_default_language_falls_back_to_expression_editor() {
    let columns = vec![
        Column::new("in", ColumnKind::Input, "In", ValueType::Date)
            .with_expression_language("juel"),
        Column::new("out", ColumnKind::Output, "Out", ValueType::String),
    ];
    let table = Table::from_parts(columns, vec![Rule::blank("r1", 2)]).unwrap();
    let mut editor = editor_with(table);

    let session = editor.begin_edit("r1", "in").unwrap();
    assert_eq!(session.language(), Some("juel"));
}

// ========================================================================
// Expression-language defaults
// ========================================================================

fn custom_config() -> ExpressionLanguagesConfig {
    ExpressionLanguagesConfig {
        options: Some(vec![
            LanguageOption::new("FEEL", "feel"),
            LanguageOption::new("JUEL", "juel"),
            LanguageOption::new("JavaScript", "javascript"),
        ]),
        defaults: None,
        default_input_expression_language: None,
        default_output_expression_language: None,
    }
}

#[test]
fn test_structured_defaults_take_precedence_over_legacy() {
    let mut config = custom_config();
    config.defaults = Some(LanguageDefaults {
        editor: None,
        input_cell: Some("javascript".to_string()),
        output_cell: None,
    });
    config.default_input_expression_language = Some("juel".to_string());

    let editor = TableEditor::with_config(config);
    assert_eq!(
        editor.languages().default_for(LanguageContext::InputCell).value,
        "javascript"
    );
}

#[test]
fn test_legacy_defaults_apply_when_structured_is_absent() {
    let mut config = custom_config();
    config.default_input_expression_language = Some("juel".to_string());
    config.default_output_expression_language = Some("javascript".to_string());

    let editor = TableEditor::with_config(config);
    assert_eq!(
        editor.languages().default_for(LanguageContext::InputCell).value,
        "juel"
    );
    assert_eq!(
        editor.languages().default_for(LanguageContext::OutputCell).value,
        "javascript"
    );
    // No legacy field exists for the editor context.
    assert_eq!(
        editor.languages().default_for(LanguageContext::Editor).value,
        "feel"
    );
}

#[test]
fn test_first_option_is_the_last_resort() {
    let editor = TableEditor::with_config(custom_config());
    for context in [
        LanguageContext::Editor,
        LanguageContext::InputCell,
        LanguageContext::OutputCell,
    ] {
        assert_eq!(editor.languages().default_for(context).value, "feel");
    }
}

#[test]
fn test_default_language_switch_changes_claiming() {
    // With juel as the input default, a plain date input column is no
    // longer simple-mode feel; the simple editor still claims it because
    // the column's effective language *is* the default.
    let mut config = custom_config();
    config.defaults = Some(LanguageDefaults {
        editor: None,
        input_cell: Some("juel".to_string()),
        output_cell: None,
    });
    let languages_editor = TableEditor::with_config(config);

    let columns = vec![
        Column::new("in", ColumnKind::Input, "In", ValueType::Date),
        Column::new("out", ColumnKind::Output, "Out", ValueType::String),
    ];
    let table = Table::from_parts(columns, vec![Rule::blank("r1", 2)]).unwrap();

    let mut editor = languages_editor;
    editor.load(table);
    let session = editor.begin_edit("r1", "in").unwrap();
    assert!(session.language().is_none());
}
