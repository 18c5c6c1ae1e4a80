//! Condition primitives and the clause-ordering state machine.
//!
//! Every statement builder composes a [`ConditionList`]: the first condition
//! is attached with `where_` and carries no connector; every later one is
//! attached with an `and_`/`or_` variant and carries exactly one. Out-of-order
//! calls fail fast at the call site, so a rendered WHERE clause can never
//! begin with a stray connector.

use crate::error::{Error, Result};
use crate::ident::{Ident, Quoting};
use crate::qb::bind::Bindings;
use crate::schema::TableDef;
use crate::value::Value;

/// A value-carrying comparison operator.
///
/// Constructors accept anything convertible to [`Value`]:
///
/// ```
/// use pgqb::Op;
///
/// Op::eq(1);
/// Op::like("%alice%");
/// Op::in_list([1, 2, 3]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// `=`
    Eq(Value),
    /// `!=`
    Ne(Value),
    /// `<`
    Lt(Value),
    /// `<=`
    Lte(Value),
    /// `>`
    Gt(Value),
    /// `>=`
    Gte(Value),
    /// `LIKE`
    Like(Value),
    /// `NOT LIKE`
    NotLike(Value),
    /// `ILIKE` (case-insensitive, PostgreSQL)
    Ilike(Value),
    /// `NOT ILIKE`
    NotIlike(Value),
    /// `IN (...)`, each element consuming one placeholder
    In(Vec<Value>),
    /// `NOT IN (…)`
    NotIn(Vec<Value>),
}

impl Op {
    pub fn eq(value: impl Into<Value>) -> Self {
        Op::Eq(value.into())
    }

    pub fn ne(value: impl Into<Value>) -> Self {
        Op::Ne(value.into())
    }

    pub fn lt(value: impl Into<Value>) -> Self {
        Op::Lt(value.into())
    }

    pub fn lte(value: impl Into<Value>) -> Self {
        Op::Lte(value.into())
    }

    pub fn gt(value: impl Into<Value>) -> Self {
        Op::Gt(value.into())
    }

    pub fn gte(value: impl Into<Value>) -> Self {
        Op::Gte(value.into())
    }

    pub fn like(pattern: impl Into<Value>) -> Self {
        Op::Like(pattern.into())
    }

    pub fn not_like(pattern: impl Into<Value>) -> Self {
        Op::NotLike(pattern.into())
    }

    pub fn ilike(pattern: impl Into<Value>) -> Self {
        Op::Ilike(pattern.into())
    }

    pub fn not_ilike(pattern: impl Into<Value>) -> Self {
        Op::NotIlike(pattern.into())
    }

    pub fn in_list<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Op::In(values.into_iter().map(Into::into).collect())
    }

    pub fn not_in<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Op::NotIn(values.into_iter().map(Into::into).collect())
    }
}

/// A nullability check. Carries no value and never consumes a placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullOp {
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
}

impl NullOp {
    fn sql(self) -> &'static str {
        match self {
            NullOp::IsNull => "IS NULL",
            NullOp::IsNotNull => "IS NOT NULL",
        }
    }
}

/// The logical connector joining a condition to the one before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    fn sql(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// Normalized predicate stored per condition.
#[derive(Clone, Debug, PartialEq)]
enum Test {
    Cmp { op: &'static str, value: Value },
    Null { op: &'static str },
    List { op: &'static str, values: Vec<Value> },
}

/// One accumulated condition. The first in a list has `connector: None`;
/// every later one has `Some(..)`.
#[derive(Clone, Debug, PartialEq)]
struct Condition {
    column: Ident,
    test: Test,
    connector: Option<Connector>,
}

/// Explicit clause-ordering state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum WhereState {
    #[default]
    NoCondition,
    HasCondition,
}

/// The condition accumulator composed by every statement builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ConditionList {
    conditions: Vec<Condition>,
    state: WhereState,
}

impl ConditionList {
    pub(crate) fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Attach the first condition. Legal only while no condition exists.
    pub(crate) fn first(&mut self, table: &TableDef, column: &str, op: Op) -> Result<()> {
        if self.state == WhereState::HasCondition {
            return Err(Error::MisplacedWhere);
        }
        let (column, test) = resolve(table, column, op)?;
        self.conditions.push(Condition {
            column,
            test,
            connector: None,
        });
        self.state = WhereState::HasCondition;
        Ok(())
    }

    /// Attach a chained condition. Legal only once a first condition exists.
    pub(crate) fn chained(
        &mut self,
        table: &TableDef,
        column: &str,
        op: Op,
        connector: Connector,
        method: &'static str,
    ) -> Result<()> {
        if self.state == WhereState::NoCondition {
            return Err(Error::MissingWhere(method));
        }
        let (column, test) = resolve(table, column, op)?;
        self.conditions.push(Condition {
            column,
            test,
            connector: Some(connector),
        });
        Ok(())
    }

    /// Attach a chained nullability check. Legal only once a first condition exists.
    pub(crate) fn chained_null(
        &mut self,
        table: &TableDef,
        column: &str,
        op: NullOp,
        connector: Connector,
        method: &'static str,
    ) -> Result<()> {
        if self.state == WhereState::NoCondition {
            return Err(Error::MissingWhere(method));
        }
        let (column, _) = table.check_column(column)?;
        self.conditions.push(Condition {
            column,
            test: Test::Null { op: op.sql() },
            connector: Some(connector),
        });
        Ok(())
    }

    /// Render the condition list, pushing bindings in order.
    ///
    /// The first condition has no leading connector; each later one is joined
    /// by ` AND `/` OR `. Nullability checks emit no placeholder.
    pub(crate) fn render(&self, quoting: Quoting, bindings: &mut Bindings) -> String {
        let mut out = String::new();
        for cond in &self.conditions {
            if let Some(connector) = cond.connector {
                out.push(' ');
                out.push_str(connector.sql());
                out.push(' ');
            }
            cond.column.write_sql(&mut out, quoting);
            match &cond.test {
                Test::Cmp { op, value } => {
                    out.push(' ');
                    out.push_str(op);
                    out.push_str(" $");
                    out.push_str(&bindings.push(value.clone()).to_string());
                }
                Test::Null { op } => {
                    out.push(' ');
                    out.push_str(op);
                }
                Test::List { op, values } => {
                    out.push(' ');
                    out.push_str(op);
                    out.push_str(" (");
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        out.push('$');
                        out.push_str(&bindings.push(value.clone()).to_string());
                    }
                    out.push(')');
                }
            }
        }
        out
    }
}

/// Generates the condition methods shared by every statement builder. The
/// expanding type must have `table: Arc<TableDef>` and `conditions:
/// ConditionList` fields.
macro_rules! impl_condition_methods {
    ($builder:ty) => {
        impl $builder {
            /// Attach the first condition of the WHERE clause.
            ///
            /// Fails with [`Error::MisplacedWhere`](crate::Error::MisplacedWhere)
            /// if a condition has already been attached.
            pub fn where_(mut self, column: &str, op: $crate::qb::Op) -> $crate::Result<Self> {
                self.conditions.first(&self.table, column, op)?;
                Ok(self)
            }

            /// Chain a condition with `AND`. Requires a prior `where_`.
            pub fn and_where(mut self, column: &str, op: $crate::qb::Op) -> $crate::Result<Self> {
                self.conditions.chained(
                    &self.table,
                    column,
                    op,
                    $crate::qb::Connector::And,
                    "and_where",
                )?;
                Ok(self)
            }

            /// Chain a condition with `OR`. Requires a prior `where_`.
            pub fn or_where(mut self, column: &str, op: $crate::qb::Op) -> $crate::Result<Self> {
                self.conditions.chained(
                    &self.table,
                    column,
                    op,
                    $crate::qb::Connector::Or,
                    "or_where",
                )?;
                Ok(self)
            }

            /// Chain a nullability check with `AND`. Requires a prior `where_`.
            pub fn and_where_null(
                mut self,
                column: &str,
                op: $crate::qb::NullOp,
            ) -> $crate::Result<Self> {
                self.conditions.chained_null(
                    &self.table,
                    column,
                    op,
                    $crate::qb::Connector::And,
                    "and_where_null",
                )?;
                Ok(self)
            }

            /// Chain a nullability check with `OR`. Requires a prior `where_`.
            pub fn or_where_null(
                mut self,
                column: &str,
                op: $crate::qb::NullOp,
            ) -> $crate::Result<Self> {
                self.conditions.chained_null(
                    &self.table,
                    column,
                    op,
                    $crate::qb::Connector::Or,
                    "or_where_null",
                )?;
                Ok(self)
            }
        }
    };
}

pub(crate) use impl_condition_methods;

/// Resolve a column reference and normalize the operator into a [`Test`],
/// type-checking every operand against the column's declared type.
fn resolve(table: &TableDef, column: &str, op: Op) -> Result<(Ident, Test)> {
    let (column, ty) = table.check_column(column)?;
    let cmp = |op: &'static str, value: Value| -> Result<Test> {
        Ok(Test::Cmp {
            op,
            value: table.check_value(&column, ty, value)?,
        })
    };
    let list = |op: &'static str, values: Vec<Value>| -> Result<Test> {
        if values.is_empty() {
            return Err(Error::EmptyPayload("IN list has no values"));
        }
        let values = values
            .into_iter()
            .map(|v| table.check_value(&column, ty, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Test::List { op, values })
    };
    let test = match op {
        Op::Eq(v) => cmp("=", v)?,
        Op::Ne(v) => cmp("!=", v)?,
        Op::Lt(v) => cmp("<", v)?,
        Op::Lte(v) => cmp("<=", v)?,
        Op::Gt(v) => cmp(">", v)?,
        Op::Gte(v) => cmp(">=", v)?,
        Op::Like(v) => cmp("LIKE", v)?,
        Op::NotLike(v) => cmp("NOT LIKE", v)?,
        Op::Ilike(v) => cmp("ILIKE", v)?,
        Op::NotIlike(v) => cmp("NOT ILIKE", v)?,
        Op::In(vs) => list("IN", vs)?,
        Op::NotIn(vs) => list("NOT IN", vs)?,
    };
    Ok((column, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use std::sync::Arc;

    fn users() -> Arc<TableDef> {
        Schema::builder()
            .table("users", |t| t.number("id").text("name").number("age"))
            .build()
            .unwrap()
            .table("users")
            .unwrap()
    }

    #[test]
    fn first_then_chained_renders_connectors() {
        let table = users();
        let mut list = ConditionList::default();
        list.first(&table, "id", Op::eq(1)).unwrap();
        list.chained(&table, "age", Op::gte(18), Connector::And, "and_where")
            .unwrap();
        list.chained(&table, "name", Op::like("%a%"), Connector::Or, "or_where")
            .unwrap();

        let mut bindings = Bindings::new();
        let sql = list.render(Quoting::Bare, &mut bindings);
        assert_eq!(sql, "id = $1 AND age >= $2 OR name LIKE $3");
        assert_eq!(
            bindings.into_values(),
            vec![Value::Int(1), Value::Int(18), Value::Text("%a%".into())]
        );
    }

    #[test]
    fn where_twice_is_an_ordering_violation() {
        let table = users();
        let mut list = ConditionList::default();
        list.first(&table, "id", Op::eq(1)).unwrap();
        let err = list.first(&table, "id", Op::eq(2)).unwrap_err();
        assert!(err.is_ordering_violation());
        assert!(matches!(err, Error::MisplacedWhere));
    }

    #[test]
    fn chained_before_first_is_an_ordering_violation() {
        let table = users();
        let mut list = ConditionList::default();
        let err = list
            .chained(&table, "id", Op::eq(1), Connector::And, "and_where")
            .unwrap_err();
        assert!(matches!(err, Error::MissingWhere("and_where")));

        let err = list
            .chained_null(&table, "name", NullOp::IsNull, Connector::Or, "or_where_null")
            .unwrap_err();
        assert!(matches!(err, Error::MissingWhere("or_where_null")));
    }

    #[test]
    fn null_checks_consume_no_placeholder() {
        let table = users();
        let mut list = ConditionList::default();
        list.first(&table, "age", Op::gte(18)).unwrap();
        list.chained_null(&table, "name", NullOp::IsNull, Connector::Or, "or_where_null")
            .unwrap();
        list.chained_null(
            &table,
            "name",
            NullOp::IsNotNull,
            Connector::And,
            "and_where_null",
        )
        .unwrap();

        let mut bindings = Bindings::new();
        let sql = list.render(Quoting::Bare, &mut bindings);
        assert_eq!(sql, "age >= $1 OR name IS NULL AND name IS NOT NULL");
        assert_eq!(bindings.into_values(), vec![Value::Int(18)]);
    }

    #[test]
    fn in_list_consumes_one_placeholder_per_element() {
        let table = users();
        let mut list = ConditionList::default();
        list.first(&table, "id", Op::in_list([1, 2, 3])).unwrap();

        let mut bindings = Bindings::new();
        let sql = list.render(Quoting::Bare, &mut bindings);
        assert_eq!(sql, "id IN ($1, $2, $3)");
        assert_eq!(
            bindings.into_values(),
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn empty_in_list_is_rejected() {
        let table = users();
        let mut list = ConditionList::default();
        let err = list
            .first(&table, "id", Op::in_list(Vec::<i64>::new()))
            .unwrap_err();
        assert!(err.is_empty_payload());
    }

    #[test]
    fn condition_value_is_type_checked() {
        let table = users();
        let mut list = ConditionList::default();
        let err = list.first(&table, "age", Op::eq("eighteen")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref column, .. } if column == "age"));
    }

    #[test]
    fn unknown_condition_column_is_rejected() {
        let table = users();
        let mut list = ConditionList::default();
        let err = list.first(&table, "nickname", Op::eq(1)).unwrap_err();
        assert!(err.is_schema_violation());
    }
}
