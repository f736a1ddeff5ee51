//! Cell content and its validation state.

use serde::{Deserialize, Serialize};

use crate::value::{parse_value, ParsedValue, ValueType};

/// Validation state of a cell under its column's declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Valid,
    Invalid { reason: String },
}

/// One cell of a rule.
///
/// Identity is derived from (rule id, column id); the cell itself stores
/// only content. The raw text is authoritative — the parsed value and
/// status are a cache derived from it and the owning column's type, and
/// are re-derived whenever either changes. Invalid text is kept verbatim:
/// invalid-but-visible beats silently discarding user input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed: Option<ParsedValue>,
    status: CellStatus,
}

impl Cell {
    /// An empty cell. Blank text is valid under every type.
    pub fn empty() -> Self {
        Self {
            raw: String::new(),
            parsed: None,
            status: CellStatus::Valid,
        }
    }

    /// A cell holding `raw`, validated against the given type.
    pub fn new(raw: impl Into<String>, value_type: ValueType) -> Self {
        let mut cell = Self {
            raw: raw.into(),
            parsed: None,
            status: CellStatus::Valid,
        };
        cell.revalidate(value_type);
        cell
    }

    /// The raw text, exactly as entered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The cached parsed value, if the raw text is non-blank and valid.
    pub fn parsed(&self) -> Option<&ParsedValue> {
        self.parsed.as_ref()
    }

    pub fn status(&self) -> &CellStatus {
        &self.status
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.status, CellStatus::Valid)
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Replace the raw text and re-derive the cache.
    pub(crate) fn set_raw(&mut self, raw: String, value_type: ValueType) {
        self.raw = raw;
        self.revalidate(value_type);
    }

    /// Re-derive the parsed value and status, e.g. after the owning
    /// column's type changed.
    pub(crate) fn revalidate(&mut self, value_type: ValueType) {
        match parse_value(value_type, &self.raw) {
            Ok(parsed) => {
                self.parsed = parsed;
                self.status = CellStatus::Valid;
            }
            Err(err) => {
                self.parsed = None;
                self.status = CellStatus::Invalid {
                    reason: err.to_string(),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_is_valid() {
        let cell = Cell::empty();
        assert!(cell.is_valid());
        assert!(cell.is_empty());
        assert_eq!(cell.parsed(), None);
    }

    #[test]
    fn test_invalid_text_round_trips() {
        let cell = Cell::new("not a date", ValueType::Date);
        assert!(!cell.is_valid());
        assert_eq!(cell.raw(), "not a date");
        assert_eq!(cell.parsed(), None);
        match cell.status() {
            CellStatus::Invalid { reason } => assert!(reason.contains("not a date")),
            CellStatus::Valid => panic!("expected invalid status"),
        }
    }

    #[test]
    fn test_revalidate_after_type_change() {
        let mut cell = Cell::new("42", ValueType::Number);
        assert!(cell.is_valid());
        assert_eq!(cell.parsed(), Some(&ParsedValue::Number(42.0)));

        cell.revalidate(ValueType::Date);
        assert!(!cell.is_valid());
        assert_eq!(cell.raw(), "42");

        cell.revalidate(ValueType::String);
        assert!(cell.is_valid());
    }
}
