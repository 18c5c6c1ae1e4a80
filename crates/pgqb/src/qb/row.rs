//! Ordered column→value payloads for INSERT values and UPDATE assignments.

use crate::value::Value;

/// An ordered mapping from column name to [`Value`].
///
/// Insertion order is preserved. Setting a column twice overwrites the earlier
/// value in place rather than appending a duplicate entry.
///
/// ```
/// use pgqb::{Row, Value};
///
/// let row = Row::new().set("name", "a").set("age", 1).set("name", "b");
/// assert_eq!(row.len(), 2);
/// assert_eq!(row.get("name"), Some(&Value::Text("b".into())));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column's value, overwriting any earlier value for that column.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.put(column, value.into());
        self
    }

    pub(crate) fn put(&mut self, column: &str, value: Value) {
        match self.entries.iter_mut().find(|(c, _)| c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column.to_string(), value)),
        }
    }

    /// Number of distinct columns in this row.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a column's value.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub(crate) fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let row = Row::new().set("b", 1).set("a", 2).set("c", 3);
        let cols: Vec<&str> = row.columns().collect();
        assert_eq!(cols, ["b", "a", "c"]);
    }

    #[test]
    fn duplicate_column_overwrites_in_place() {
        let row = Row::new().set("a", 1).set("b", 2).set("a", 3);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("a"), Some(&Value::Int(3)));
        let cols: Vec<&str> = row.columns().collect();
        assert_eq!(cols, ["a", "b"]);
    }

    #[test]
    fn none_becomes_null() {
        let row = Row::new().set("a", Option::<i64>::None);
        assert_eq!(row.get("a"), Some(&Value::Null));
    }
}
