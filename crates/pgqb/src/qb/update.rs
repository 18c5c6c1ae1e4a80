use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ident::{Ident, Quoting};
use crate::qb::bind::Bindings;
use crate::qb::condition::{impl_condition_methods, ConditionList};
use crate::qb::row::Row;
use crate::qb::traits::{Query, ToQuery};
use crate::qb::Columns;
use crate::schema::TableDef;
use crate::value::Value;

/// Builds an `UPDATE` statement.
///
/// SET assignments bind their values first, conditions after, so placeholder
/// numbers run in clause order. Assigning the same column twice overwrites
/// the earlier value.
#[derive(Clone, Debug)]
pub struct UpdateBuilder {
    table: Arc<TableDef>,
    quoting: Quoting,
    assignments: Vec<(Ident, Value)>,
    conditions: ConditionList,
    returning: Option<Columns>,
}

impl UpdateBuilder {
    pub(crate) fn new(table: Arc<TableDef>, quoting: Quoting) -> Self {
        Self {
            table,
            quoting,
            assignments: Vec::new(),
            conditions: ConditionList::default(),
            returning: None,
        }
    }

    /// Assign a value to a column. Checked against the table at the call site.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Result<Self> {
        let (ident, ty) = self.table.check_column(column)?;
        let value = self.table.check_value(&ident, ty, value.into())?;
        match self
            .assignments
            .iter_mut()
            .find(|(c, _)| c.as_str() == ident.as_str())
        {
            Some(entry) => entry.1 = value,
            None => self.assignments.push((ident, value)),
        }
        Ok(self)
    }

    /// Merge every entry of a [`Row`] into the assignment list, key-wise.
    pub fn set_row(mut self, row: Row) -> Result<Self> {
        for (column, value) in row.entries() {
            self = self.set(column, value.clone())?;
        }
        Ok(self)
    }

    /// Add a `RETURNING` clause. `&["*"]` returns every column.
    pub fn returning(mut self, columns: &[&str]) -> Result<Self> {
        self.returning = Some(Columns::resolve(&self.table, columns)?);
        Ok(self)
    }
}

impl_condition_methods!(UpdateBuilder);

impl ToQuery for UpdateBuilder {
    fn to_query(&self) -> Result<Query> {
        if self.assignments.is_empty() {
            return Err(Error::EmptyPayload("UPDATE has no assignments"));
        }
        let mut bindings = Bindings::new();
        let mut sql = String::from("UPDATE ");
        self.table.name().write_sql(&mut sql, self.quoting);
        sql.push_str(" SET ");
        for (i, (column, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            column.write_sql(&mut sql, self.quoting);
            sql.push_str(" = $");
            sql.push_str(&bindings.push(value.clone()).to_string());
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::Op;
    use crate::schema::Schema;

    fn schema() -> Schema {
        Schema::builder()
            .table("users", |t| t.number("id").text("name").number("age"))
            .build()
            .unwrap()
    }

    #[test]
    fn set_then_where_share_one_counter() {
        let query = schema()
            .update("users")
            .unwrap()
            .set("name", "x")
            .unwrap()
            .where_("id", Op::eq(5))
            .unwrap()
            .returning(&["id"])
            .unwrap()
            .to_query()
            .unwrap();
        assert_eq!(
            query.sql,
            "UPDATE users SET name = $1 WHERE id = $2 RETURNING id"
        );
        assert_eq!(query.bindings, vec![Value::Text("x".into()), Value::Int(5)]);
    }

    #[test]
    fn binding_count_is_assignments_plus_conditions() {
        let query = schema()
            .update("users")
            .unwrap()
            .set("name", "x")
            .unwrap()
            .set("age", 30)
            .unwrap()
            .where_("id", Op::gt(10))
            .unwrap()
            .and_where("age", Op::lt(65))
            .unwrap()
            .to_query()
            .unwrap();
        assert_eq!(
            query.sql,
            "UPDATE users SET name = $1, age = $2 WHERE id > $3 AND age < $4"
        );
        assert_eq!(query.bindings.len(), 4);
    }

    #[test]
    fn duplicate_assignment_overwrites() {
        let query = schema()
            .update("users")
            .unwrap()
            .set("name", "x")
            .unwrap()
            .set("name", "y")
            .unwrap()
            .to_query()
            .unwrap();
        assert_eq!(query.sql, "UPDATE users SET name = $1");
        assert_eq!(query.bindings, vec![Value::Text("y".into())]);
    }

    #[test]
    fn set_row_merges_key_wise() {
        let query = schema()
            .update("users")
            .unwrap()
            .set("name", "x")
            .unwrap()
            .set_row(Row::new().set("name", "y").set("age", 30))
            .unwrap()
            .to_query()
            .unwrap();
        assert_eq!(query.sql, "UPDATE users SET name = $1, age = $2");
        assert_eq!(
            query.bindings,
            vec![Value::Text("y".into()), Value::Int(30)]
        );
    }

    #[test]
    fn update_without_assignments_is_rejected() {
        let err = schema()
            .update("users")
            .unwrap()
            .where_("id", Op::eq(1))
            .unwrap()
            .to_query()
            .unwrap_err();
        assert!(err.is_empty_payload());
    }

    #[test]
    fn assignment_is_type_checked() {
        let err = schema()
            .update("users")
            .unwrap()
            .set("age", "eighteen")
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref column, .. } if column == "age"));
    }

    #[test]
    fn null_assignment_is_admitted() {
        let query = schema()
            .update("users")
            .unwrap()
            .set("name", Option::<&str>::None)
            .unwrap()
            .to_query()
            .unwrap();
        assert_eq!(query.bindings, vec![Value::Null]);
    }
}
