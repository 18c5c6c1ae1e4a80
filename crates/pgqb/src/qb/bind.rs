//! Positional placeholder allocation.

use crate::value::Value;

/// The statement-wide binding list.
///
/// A single `Bindings` threads through every clause of a statement in fixed
/// order (SET assignments before WHERE conditions, insert rows in row order),
/// so [`Bindings::push`] yields a monotonically increasing 1-based placeholder
/// index shared by all clause types. Nullability checks and `DEFAULT` tokens
/// never go through here, so they never consume an index.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Bindings {
    values: Vec<Value>,
}

impl Bindings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a value and return its 1-based placeholder index.
    pub(crate) fn push(&mut self, value: Value) -> usize {
        self.values.push(value);
        self.values.len()
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        self.values
    }
}
