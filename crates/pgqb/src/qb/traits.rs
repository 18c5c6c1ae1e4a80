use tokio_postgres::types::ToSql;

use crate::error::Result;
use crate::value::Value;

/// A rendered SQL statement together with its positional bindings.
///
/// `bindings[0]` corresponds to `$1`, `bindings[1]` to `$2`, and so on.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub sql: String,
    pub bindings: Vec<Value>,
}

impl Query {
    /// Borrow the bindings in the form `tokio_postgres` expects.
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.bindings
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Render a builder into a [`Query`].
///
/// Rendering borrows the builder, so the same builder can be rendered more
/// than once and always yields the same statement and bindings.
pub trait ToQuery {
    fn to_query(&self) -> Result<Query>;
}
