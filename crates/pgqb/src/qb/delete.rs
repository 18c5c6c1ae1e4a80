use std::sync::Arc;

use crate::error::Result;
use crate::ident::Quoting;
use crate::qb::bind::Bindings;
use crate::qb::condition::{impl_condition_methods, ConditionList};
use crate::qb::traits::{Query, ToQuery};
use crate::qb::Columns;
use crate::schema::TableDef;

/// Builds a `DELETE` statement.
///
/// A builder with no conditions renders a full-table delete. Callers that
/// want a guard rail should check [`Query::bindings`] before executing.
#[derive(Clone, Debug)]
pub struct DeleteBuilder {
    table: Arc<TableDef>,
    quoting: Quoting,
    conditions: ConditionList,
    returning: Option<Columns>,
}

impl DeleteBuilder {
    pub(crate) fn new(table: Arc<TableDef>, quoting: Quoting) -> Self {
        Self {
            table,
            quoting,
            conditions: ConditionList::default(),
            returning: None,
        }
    }

    /// Add a `RETURNING` clause. `&["*"]` returns every column.
    pub fn returning(mut self, columns: &[&str]) -> Result<Self> {
        self.returning = Some(Columns::resolve(&self.table, columns)?);
        Ok(self)
    }
}

impl_condition_methods!(DeleteBuilder);

impl ToQuery for DeleteBuilder {
    fn to_query(&self) -> Result<Query> {
        let mut bindings = Bindings::new();
        let mut sql = String::from("DELETE FROM ");
        self.table.name().write_sql(&mut sql, self.quoting);
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.render(self.quoting, &mut bindings));
        }
        if let Some(returning) = &self.returning {
            sql.push_str(" RETURNING ");
            returning.write_sql(&mut sql, self.quoting);
        }
        Ok(Query {
            sql,
            bindings: bindings.into_values(),
        })
    }
}
