use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ident::{Ident, Quoting};
use crate::qb::bind::Bindings;
use crate::qb::row::Row;
use crate::qb::traits::{Query, ToQuery};
use crate::qb::Columns;
use crate::schema::TableDef;
use crate::value::Value;

/// Builds an `INSERT` statement, one or more rows at a time.
///
/// The column list is the union, in first-seen order, of every column named
/// across the accumulated rows. A row that omits one of those columns emits
/// the `DEFAULT` keyword in its place rather than a placeholder.
#[derive(Clone, Debug)]
pub struct InsertBuilder {
    table: Arc<TableDef>,
    quoting: Quoting,
    rows: Vec<Vec<(Ident, Value)>>,
    returning: Option<Columns>,
}

impl InsertBuilder {
    pub(crate) fn new(table: Arc<TableDef>, quoting: Quoting) -> Self {
        Self {
            table,
            quoting,
            rows: Vec::new(),
            returning: None,
        }
    }

    /// Append one row. Columns and values are checked against the table at
    /// the call site; an empty row is rejected.
    pub fn values(mut self, row: Row) -> Result<Self> {
        if row.is_empty() {
            return Err(Error::EmptyPayload("insert row has no columns"));
        }
        let mut checked = Vec::with_capacity(row.len());
        for (column, value) in row.entries() {
            let (ident, ty) = self.table.check_column(column)?;
            let value = self.table.check_value(&ident, ty, value.clone())?;
            checked.push((ident, value));
        }
        self.rows.push(checked);
        Ok(self)
    }

    /// Add a `RETURNING` clause. `&["*"]` returns every column.
    pub fn returning(mut self, columns: &[&str]) -> Result<Self> {
        self.returning = Some(Columns::resolve(&self.table, columns)?);
        Ok(self)
    }

    /// The column union across the accumulated rows, in first-seen order.
    fn column_union(&self) -> Vec<&Ident> {
        let mut union: Vec<&Ident> = Vec::new();
        for row in &self.rows {
            for (ident, _) in row {
                if !union.iter().any(|u| u.as_str() == ident.as_str()) {
                    union.push(ident);
                }
            }
        }
        union
    }
}

impl ToQuery for InsertBuilder {
    fn to_query(&self) -> Result<Query> {
        if self.rows.is_empty() {
            return Err(Error::EmptyPayload("INSERT has no rows"));
        }
        let union = self.column_union();
        let mut bindings = Bindings::new();
        let mut sql = String::from("INSERT INTO ");
        self.table.name().write_sql(&mut sql, self.quoting);
        sql.push_str(" (");
        for (i, column) in union.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            column.write_sql(&mut sql, self.quoting);
        }
        sql.push_str(") VALUES ");
        for (r, row) in self.rows.iter().enumerate() {
            if r > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            for (i, column) in union.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                match row.iter().find(|(c, _)| c.as_str() == column.as_str()) {
                    Some((_, value)) => {
                        sql.push('$');
                        sql.push_str(&bindings.push(value.clone()).to_string());
                    }
                    None => sql.push_str("DEFAULT"),
                }
            }
            sql.push(')');
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
