//! Per-type cell editing.
//!
//! Editors implement the [`CellEditor`] contract (claim, open, commit,
//! cancel); the [`EditorRegistry`] resolves a column to the first variant
//! claiming it in registration order. Simple-mode editors for the
//! recognized value types come first, the free-text expression editor
//! claims whatever is left.

mod expression;
mod registry;
mod session;
mod simple;

pub use expression::{
    ExpressionEditor, ExpressionLanguages, ExpressionLanguagesConfig, LanguageContext,
    LanguageDefaults, LanguageOption,
};
pub use registry::{CellEditor, EditorRegistry};
pub use session::EditSession;
pub use simple::SimpleEditor;

impl EditorRegistry {
    /// Registry with the built-in simple editors followed by the
    /// expression fallback.
    pub fn with_defaults(languages: ExpressionLanguages) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SimpleEditor::boolean(languages.clone())));
        registry.register(Box::new(SimpleEditor::date(languages.clone())));
        registry.register(Box::new(SimpleEditor::date_time(languages.clone())));
        registry.register(Box::new(SimpleEditor::duration(languages.clone())));
        registry.register(Box::new(SimpleEditor::number(languages.clone())));
        registry.register(Box::new(SimpleEditor::string(languages.clone())));
        registry.register(Box::new(SimpleEditor::time(languages.clone())));
        registry.register(Box::new(ExpressionEditor::new(languages)));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnKind};
    use crate::value::ValueType;

    #[test]
    fn test_resolution_prefers_simple_editor() {
        let registry = EditorRegistry::with_defaults(ExpressionLanguages::default());
        let column = Column::new("in", ColumnKind::Input, "In", ValueType::Date);
        assert_eq!(registry.resolve(&column).unwrap().name(), "simple-date");
    }

    #[test]
    fn test_non_default_language_falls_through_to_expression() {
        let registry = EditorRegistry::with_defaults(ExpressionLanguages::default());
        let column = Column::new("in", ColumnKind::Input, "In", ValueType::Date)
            .with_expression_language("juel");
        assert_eq!(registry.resolve(&column).unwrap().name(), "expression");
    }

    #[test]
    fn test_registration_order_decides_shadowing() {
        let languages = ExpressionLanguages::default();
        let mut registry = EditorRegistry::new();
        registry.register(Box::new(ExpressionEditor::new(languages.clone())));
        registry.register(Box::new(SimpleEditor::date(languages)));

        // The fallback was registered first, so it shadows everything.
        let column = Column::new("in", ColumnKind::Input, "In", ValueType::Date);
        assert_eq!(registry.resolve(&column).unwrap().name(), "expression");
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = EditorRegistry::new();
        let column = Column::new("in", ColumnKind::Input, "In", ValueType::String);
        assert!(registry.resolve(&column).is_none());
    }
}
