//! Simple-mode editors for recognized value types.
//!
//! One editor instance per supported type, all sharing the same claiming
//! rule: the column's declared type matches and its effective expression
//! language is the configured default for its kind. A column with an
//! explicit non-default language is left to the expression fallback, so
//! arbitrary expressions stay editable.

use crate::model::Column;
use crate::value::ValueType;

use super::expression::ExpressionLanguages;
use super::registry::CellEditor;

/// Simple-mode editor for one value type.
#[derive(Debug, Clone)]
pub struct SimpleEditor {
    name: &'static str,
    value_type: ValueType,
    languages: ExpressionLanguages,
}

impl SimpleEditor {
    pub fn boolean(languages: ExpressionLanguages) -> Self {
        Self::for_type("simple-boolean", ValueType::Boolean, languages)
    }

    pub fn date(languages: ExpressionLanguages) -> Self {
        Self::for_type("simple-date", ValueType::Date, languages)
    }

    pub fn date_time(languages: ExpressionLanguages) -> Self {
        Self::for_type("simple-date-time", ValueType::DateTime, languages)
    }

    pub fn duration(languages: ExpressionLanguages) -> Self {
        Self::for_type("simple-duration", ValueType::Duration, languages)
    }

    pub fn number(languages: ExpressionLanguages) -> Self {
        Self::for_type("simple-number", ValueType::Number, languages)
    }

    pub fn string(languages: ExpressionLanguages) -> Self {
        Self::for_type("simple-string", ValueType::String, languages)
    }

    pub fn time(languages: ExpressionLanguages) -> Self {
        Self::for_type("simple-time", ValueType::Time, languages)
    }

    fn for_type(name: &'static str, value_type: ValueType, languages: ExpressionLanguages) -> Self {
        Self {
            name,
            value_type,
            languages,
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl CellEditor for SimpleEditor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn can_edit(&self, column: &Column) -> bool {
        column.value_type == self.value_type && self.languages.is_default_for(column)
    }
}
