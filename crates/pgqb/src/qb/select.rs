use std::sync::Arc;

use crate::error::Result;
use crate::ident::Quoting;
use crate::qb::bind::Bindings;
use crate::qb::condition::{impl_condition_methods, ConditionList};
use crate::qb::traits::{Query, ToQuery};
use crate::qb::Columns;
use crate::schema::TableDef;

/// Builds a `SELECT` statement.
///
/// ```
/// use pgqb::{Op, Schema, ToQuery};
///
/// # fn main() -> pgqb::Result<()> {
/// let schema = Schema::builder()
///     .table("users", |t| t.number("id").text("name").number("age"))
///     .build()?;
///
/// let query = schema
///     .select("users")?
///     .columns(&["name", "age"])?
///     .where_("id", Op::eq(1))?
///     .to_query()?;
///
/// assert_eq!(query.sql, "SELECT name, age FROM users WHERE id = $1");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SelectBuilder {
    table: Arc<TableDef>,
    quoting: Quoting,
    columns: Columns,
    conditions: ConditionList,
}

impl SelectBuilder {
    pub(crate) fn new(table: Arc<TableDef>, quoting: Quoting) -> Self {
        Self {
            table,
            quoting,
            columns: Columns::Star,
            conditions: ConditionList::default(),
        }
    }

    /// Restrict the projection to the given columns.
    ///
    /// An empty list and `&["*"]` both select every column. Unknown columns
    /// are rejected at the call site.
    pub fn columns(mut self, columns: &[&str]) -> Result<Self> {
        self.columns = Columns::resolve(&self.table, columns)?;
        Ok(self)
    }
}

impl_condition_methods!(SelectBuilder);

impl ToQuery for SelectBuilder {
    fn to_query(&self) -> Result<Query> {
        let mut bindings = Bindings::new();
        let mut sql = String::from("SELECT ");
        self.columns.write_sql(&mut sql, self.quoting);
        sql.push_str(" FROM ");
        self.table.name().write_sql(&mut sql, self.quoting);
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.render(self.quoting, &mut bindings));
        }
        Ok(Query {
            sql,
            bindings: bindings.into_values(),
        })
    }
}
