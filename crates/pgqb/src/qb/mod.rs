//! Fluent statement builders.
//!
//! Each builder is obtained from a [`Schema`](crate::Schema), accumulates
//! clauses through consuming method calls, and renders to a [`Query`] via
//! [`ToQuery`]. Placeholders are numbered `$1..$n` in the order their values
//! were bound, across all clauses of the statement.

mod bind;
mod condition;
mod delete;
mod insert;
mod row;
mod select;
mod traits;
mod update;

pub use condition::{Connector, NullOp, Op};
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use row::Row;
pub use select::SelectBuilder;
pub use traits::{Query, ToQuery};
pub use update::UpdateBuilder;

use crate::error::Result;
use crate::ident::{Ident, Quoting};
use crate::schema::TableDef;

/// The projection of a SELECT statement.
#[derive(Clone, Debug)]
pub(crate) enum Columns {
    Star,
    List(Vec<Ident>),
}

impl Columns {
    /// Validate a caller-supplied column list against the table.
    ///
    /// An empty list and the single entry `"*"` both mean every column.
    pub(crate) fn resolve(table: &TableDef, columns: &[&str]) -> Result<Self> {
        if columns.is_empty() || columns == ["*"] {
            return Ok(Columns::Star);
        }
        let mut list = Vec::with_capacity(columns.len());
        for column in columns {
            let (ident, _) = table.check_column(column)?;
            list.push(ident);
        }
        Ok(Columns::List(list))
    }

    pub(crate) fn write_sql(&self, out: &mut String, quoting: Quoting) {
        match self {
            Columns::Star => out.push('*'),
            Columns::List(idents) => {
                for (i, ident) in idents.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    ident.write_sql(out, quoting);
                }
            }
        }
    }
}
