//! The row abstraction the mapper reads from.

use crate::value::ColumnValue;

/// One database result row of named-column values.
///
/// `get` is the untyped lookup; `None` means the column is absent from the
/// row, which the conversion layer treats the same as SQL NULL. Typed
/// extraction is layered on top by [`crate::ConverterRegistry`]. Rows are
/// borrowed by the mapper and never mutated or retained.
pub trait TupleRow {
    /// Look up a column by its label.
    fn get(&self, label: &str) -> Option<&ColumnValue>;
}

/// An insertion-ordered, in-memory [`TupleRow`].
///
/// The standard row implementation for adapters, examples, and tests.
/// Duplicate labels resolve to the first occurrence.
///
/// ```
/// use rowcast_core::{ColumnValue, MemoryRow, TupleRow};
///
/// let row = MemoryRow::new()
///     .with("id", 7i64)
///     .with("email", "a@example.com")
///     .with("deleted_at", ColumnValue::Null);
///
/// assert_eq!(row.get("id"), Some(&ColumnValue::Int(7)));
/// assert!(row.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRow {
    columns: Vec<(String, ColumnValue)>,
}

impl MemoryRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.push(label, value);
        self
    }

    /// Append a column in place.
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<ColumnValue>) {
        self.columns.push((label.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TupleRow for MemoryRow {
    fn get(&self, label: &str) -> Option<&ColumnValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_label() {
        let row = MemoryRow::new().with("a", 1i64).with("b", "text");
        assert_eq!(row.get("a"), Some(&ColumnValue::Int(1)));
        assert_eq!(row.get("b"), Some(&ColumnValue::Text("text".to_string())));
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn duplicate_labels_resolve_to_the_first() {
        let row = MemoryRow::new().with("a", 1i64).with("a", 2i64);
        assert_eq!(row.get("a"), Some(&ColumnValue::Int(1)));
    }

    #[test]
    fn null_columns_are_present_but_null() {
        let row = MemoryRow::new().with("gone", ColumnValue::Null);
        assert_eq!(row.get("gone"), Some(&ColumnValue::Null));
        assert_eq!(row.len(), 1);
        assert!(!row.is_empty());
    }
}
