//! Column definitions.

use serde::{Deserialize, Serialize};

use crate::value::ValueType;

/// Narrowest width a column can be resized to, in pixels.
pub const MIN_COLUMN_WIDTH: u32 = 70;

/// Width assigned to newly created columns.
pub const DEFAULT_COLUMN_WIDTH: u32 = 192;

/// Stable identifier for a column. Survives reorders; cells are addressed
/// by (rule id, column id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Role a column plays in the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Input,
    Output,
    Annotation,
}

impl ColumnKind {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Input => "input",
            ColumnKind::Output => "output",
            ColumnKind::Annotation => "annotation",
        }
    }
}

/// One column of the table: identity, role, display label, and the
/// declared type every cell in the column is validated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub kind: ColumnKind,
    pub label: String,
    pub value_type: ValueType,
    /// Expression language override. `None` means the configured default
    /// for this column's kind applies.
    pub expression_language: Option<String>,
    /// Display width in pixels.
    pub width: u32,
}

impl Column {
    pub fn new(
        id: impl Into<ColumnId>,
        kind: ColumnKind,
        label: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            value_type,
            expression_language: None,
            width: DEFAULT_COLUMN_WIDTH,
        }
    }

    pub fn with_expression_language(mut self, language: impl Into<String>) -> Self {
        self.expression_language = Some(language.into());
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder_defaults() {
        let column = Column::new("input_1", ColumnKind::Input, "Amount", ValueType::Number);
        assert_eq!(column.id.as_str(), "input_1");
        assert_eq!(column.width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(column.expression_language, None);

        let column = column.with_expression_language("juel").with_width(240);
        assert_eq!(column.expression_language.as_deref(), Some("juel"));
        assert_eq!(column.width, 240);
    }
}
