//! Expression-language configuration and the generic fallback editor.

use serde::{Deserialize, Serialize};

use crate::model::{Cell, Column, ColumnKind};

use super::registry::CellEditor;
use super::session::EditSession;

/// A selectable expression language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub label: String,
    pub value: String,
}

impl LanguageOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Contexts a default expression language can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageContext {
    Editor,
    InputCell,
    OutputCell,
}

/// Per-context default language values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageDefaults {
    pub editor: Option<String>,
    pub input_cell: Option<String>,
    pub output_cell: Option<String>,
}

/// Configuration as the embedding application supplies it.
///
/// Two overlapping paths are accepted: the structured `defaults` map and
/// the older per-kind fields kept for backward compatibility. Structured
/// config wins; the legacy fields are a fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionLanguagesConfig {
    pub options: Option<Vec<LanguageOption>>,
    pub defaults: Option<LanguageDefaults>,
    pub default_input_expression_language: Option<String>,
    pub default_output_expression_language: Option<String>,
}

/// The configured expression languages and their per-context defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionLanguages {
    options: Vec<LanguageOption>,
    defaults: LanguageDefaults,
    legacy_input: Option<String>,
    legacy_output: Option<String>,
}

impl Default for ExpressionLanguages {
    fn default() -> Self {
        Self::from_config(ExpressionLanguagesConfig::default())
    }
}

impl ExpressionLanguages {
    pub fn from_config(config: ExpressionLanguagesConfig) -> Self {
        Self {
            options: config
                .options
                .unwrap_or_else(|| vec![LanguageOption::new("FEEL", "feel")]),
            defaults: config.defaults.unwrap_or_default(),
            legacy_input: config.default_input_expression_language,
            legacy_output: config.default_output_expression_language,
        }
    }

    /// All configured options, in configuration order.
    pub fn all(&self) -> &[LanguageOption] {
        &self.options
    }

    /// The default language for a context. Precedence: structured
    /// defaults, then the legacy per-kind fields, then the first option.
    pub fn default_for(&self, context: LanguageContext) -> LanguageOption {
        let configured = match context {
            LanguageContext::Editor => self.defaults.editor.as_deref(),
            LanguageContext::InputCell => self
                .defaults
                .input_cell
                .as_deref()
                .or(self.legacy_input.as_deref()),
            LanguageContext::OutputCell => self
                .defaults
                .output_cell
                .as_deref()
                .or(self.legacy_output.as_deref()),
        };

        match configured {
            Some(value) => self.option_for(value),
            None => self
                .options
                .first()
                .cloned()
                .unwrap_or_else(|| LanguageOption::new("FEEL", "feel")),
        }
    }

    /// The default language for cells of a column kind. Annotations have
    /// no cell context and fall back to the editor default.
    pub fn default_for_kind(&self, kind: ColumnKind) -> LanguageOption {
        match kind {
            ColumnKind::Input => self.default_for(LanguageContext::InputCell),
            ColumnKind::Output => self.default_for(LanguageContext::OutputCell),
            ColumnKind::Annotation => self.default_for(LanguageContext::Editor),
        }
    }

    /// The language a column's cells are effectively edited in: its own
    /// declared language, or the default for its kind.
    pub fn effective_for(&self, column: &Column) -> LanguageOption {
        match &column.expression_language {
            Some(value) => self.option_for(value),
            None => self.default_for_kind(column.kind),
        }
    }

    /// Whether the column's effective language is the default for its
    /// kind, i.e. simple-mode editors may claim it.
    pub fn is_default_for(&self, column: &Column) -> bool {
        self.effective_for(column).value == self.default_for_kind(column.kind).value
    }

    /// Resolve a language value to its configured option; unconfigured
    /// values are carried through with the value as label.
    fn option_for(&self, value: &str) -> LanguageOption {
        self.options
            .iter()
            .find(|option| option.value.eq_ignore_ascii_case(value))
            .cloned()
            .unwrap_or_else(|| LanguageOption::new(value, value))
    }
}

/// Fallback editor: free-text entry tagged with the column's effective
/// expression language. Claims every column, so it must be registered
/// last.
#[derive(Debug, Clone)]
pub struct ExpressionEditor {
    languages: ExpressionLanguages,
}

impl ExpressionEditor {
    pub fn new(languages: ExpressionLanguages) -> Self {
        Self { languages }
    }
}

impl CellEditor for ExpressionEditor {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn can_edit(&self, _column: &Column) -> bool {
        true
    }

    fn open(&self, cell: &Cell, column: &Column) -> EditSession {
        let language = self.languages.effective_for(column);
        EditSession::open(cell, column).with_language(language.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_options() -> Vec<LanguageOption> {
        vec![
            LanguageOption::new("FEEL", "feel"),
            LanguageOption::new("JUEL", "juel"),
            LanguageOption::new("JavaScript", "javascript"),
            LanguageOption::new("JRuby", "jruby"),
        ]
    }

    #[test]
    fn test_defaults_to_feel() {
        let languages = ExpressionLanguages::default();
        assert_eq!(
            languages.default_for(LanguageContext::Editor),
            LanguageOption::new("FEEL", "feel")
        );
        assert_eq!(
            languages.default_for(LanguageContext::InputCell),
            LanguageOption::new("FEEL", "feel")
        );
        assert_eq!(languages.all(), &[LanguageOption::new("FEEL", "feel")]);
    }

    #[test]
    fn test_structured_defaults_win() {
        let languages = ExpressionLanguages::from_config(ExpressionLanguagesConfig {
            options: Some(custom_options()),
            defaults: Some(LanguageDefaults {
                editor: Some("javascript".to_string()),
                input_cell: Some("jruby".to_string()),
                output_cell: None,
            }),
            default_input_expression_language: Some("juel".to_string()),
            default_output_expression_language: None,
        });

        assert_eq!(
            languages.default_for(LanguageContext::Editor),
            LanguageOption::new("JavaScript", "javascript")
        );
        // Structured input default shadows the legacy field.
        assert_eq!(
            languages.default_for(LanguageContext::InputCell),
            LanguageOption::new("JRuby", "jruby")
        );
    }

    #[test]
    fn test_legacy_defaults_are_fallback() {
        let languages = ExpressionLanguages::from_config(ExpressionLanguagesConfig {
            options: Some(custom_options()),
            defaults: None,
            default_input_expression_language: Some("jruby".to_string()),
            default_output_expression_language: Some("javascript".to_string()),
        });

        assert_eq!(
            languages.default_for(LanguageContext::InputCell),
            LanguageOption::new("JRuby", "jruby")
        );
        assert_eq!(
            languages.default_for(LanguageContext::OutputCell),
            LanguageOption::new("JavaScript", "javascript")
        );
        // Editor context has no legacy field; first option wins.
        assert_eq!(
            languages.default_for(LanguageContext::Editor),
            LanguageOption::new("FEEL", "feel")
        );
    }

    #[test]
    fn test_unconfigured_value_carried_through() {
        let languages = ExpressionLanguages::default();
        use crate::value::ValueType;
        let column = Column::new("in", ColumnKind::Input, "In", ValueType::String)
            .with_expression_language("groovy");
        assert_eq!(
            languages.effective_for(&column),
            LanguageOption::new("groovy", "groovy")
        );
        assert!(!languages.is_default_for(&column));
    }
}
