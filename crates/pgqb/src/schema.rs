//! Config-time table schema and builder entry points.
//!
//! A [`Schema`] maps table names to their columns and is the sole factory for
//! statement builders: every table and column reference is checked against it
//! before any SQL text exists.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ident::{Ident, Quoting};
use crate::qb::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
use crate::value::Value;

/// The closed set of column types this builder understands.
///
/// No dates, arrays, or JSON in this version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// UTF-8 text.
    Text,
    /// Integer or floating-point number.
    Number,
    /// Boolean.
    Boolean,
    /// A column that only ever holds NULL.
    Null,
}

impl ColumnType {
    pub(crate) fn name(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Null => "null",
        }
    }

    /// Whether a value is acceptable for a column of this type.
    ///
    /// NULL is admitted everywhere; nullability constraints belong to the
    /// database, not this layer.
    pub(crate) fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (ColumnType::Text, Value::Text(_)) => true,
            (ColumnType::Number, Value::Int(_) | Value::Float(_)) => true,
            (ColumnType::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

/// A column definition: validated name plus declared type.
#[derive(Clone, Debug)]
pub struct ColumnDef {
    name: Ident,
    ty: ColumnType,
}

impl ColumnDef {
    /// The column name.
    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// The declared column type.
    pub fn ty(&self) -> ColumnType {
        self.ty
    }
}

/// A table definition: validated name plus ordered columns.
#[derive(Clone, Debug)]
pub struct TableDef {
    name: Ident,
    columns: Vec<ColumnDef>,
}

impl TableDef {
    /// The table name.
    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// The table's columns, in declaration order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name.as_str() == name)
    }

    /// Resolve a column reference or fail with a schema violation.
    pub(crate) fn check_column(&self, name: &str) -> Result<(Ident, ColumnType)> {
        match self.column(name) {
            Some(col) => Ok((col.name.clone(), col.ty)),
            None => Err(Error::UnknownColumn {
                table: self.name.as_str().to_string(),
                column: name.to_string(),
            }),
        }
    }

    /// Check a value against a column's declared type.
    pub(crate) fn check_value(&self, column: &Ident, ty: ColumnType, value: Value) -> Result<Value> {
        if ty.admits(&value) {
            Ok(value)
        } else {
            Err(Error::TypeMismatch {
                column: column.as_str().to_string(),
                expected: ty.name(),
                value,
            })
        }
    }
}

/// A registry of table definitions plus the output quoting style.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    tables: HashMap<String, Arc<TableDef>>,
    quoting: Quoting,
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Look up a table definition.
    pub fn table(&self, name: &str) -> Result<Arc<TableDef>> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    /// The quoting style applied to identifiers in generated SQL.
    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// Create a SELECT builder for the given table.
    pub fn select(&self, table: &str) -> Result<SelectBuilder> {
        Ok(SelectBuilder::new(self.table(table)?, self.quoting))
    }

    /// Create an INSERT builder for the given table.
    pub fn insert(&self, table: &str) -> Result<InsertBuilder> {
        Ok(InsertBuilder::new(self.table(table)?, self.quoting))
    }

    /// Create an UPDATE builder for the given table.
    pub fn update(&self, table: &str) -> Result<UpdateBuilder> {
        Ok(UpdateBuilder::new(self.table(table)?, self.quoting))
    }

    /// Create a DELETE builder for the given table.
    ///
    /// A DELETE with no WHERE clause is legal and deletes every row; the
    /// caller bears responsibility for unfiltered deletes.
    pub fn delete(&self, table: &str) -> Result<DeleteBuilder> {
        Ok(DeleteBuilder::new(self.table(table)?, self.quoting))
    }
}

/// Fluent [`Schema`] construction.
///
/// # Example
/// ```
/// use pgqb::Schema;
///
/// let schema = Schema::builder()
///     .table("users", |t| t.number("id").text("name").boolean("is_admin"))
///     .build()?;
/// # Ok::<(), pgqb::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    tables: Vec<(String, Vec<(String, ColumnType)>)>,
    quoting: Quoting,
}

impl SchemaBuilder {
    /// Define a table and its columns.
    pub fn table(mut self, name: &str, f: impl FnOnce(TableBuilder) -> TableBuilder) -> Self {
        let tb = f(TableBuilder::default());
        self.tables.push((name.to_string(), tb.columns));
        self
    }

    /// Set the identifier quoting style for all builders created from this schema.
    pub fn quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    /// Validate all identifiers and produce the schema.
    pub fn build(self) -> Result<Schema> {
        let mut tables = HashMap::with_capacity(self.tables.len());
        for (name, cols) in self.tables {
            let table_name = Ident::new(&name)?;
            let mut columns = Vec::with_capacity(cols.len());
            for (col, ty) in cols {
                columns.push(ColumnDef {
                    name: Ident::new(&col)?,
                    ty,
                });
            }
            tables.insert(
                name,
                Arc::new(TableDef {
                    name: table_name,
                    columns,
                }),
            );
        }
        Ok(Schema {
            tables,
            quoting: self.quoting,
        })
    }
}

/// Column collection for one table inside [`SchemaBuilder::table`].
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<(String, ColumnType)>,
}

impl TableBuilder {
    /// Add a column with an explicit type.
    pub fn column(mut self, name: &str, ty: ColumnType) -> Self {
        self.columns.push((name.to_string(), ty));
        self
    }

    /// Add a text column.
    pub fn text(self, name: &str) -> Self {
        self.column(name, ColumnType::Text)
    }

    /// Add a number column.
    pub fn number(self, name: &str) -> Self {
        self.column(name, ColumnType::Number)
    }

    /// Add a boolean column.
    pub fn boolean(self, name: &str) -> Self {
        self.column(name, ColumnType::Boolean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Schema {
        Schema::builder()
            .table("users", |t| {
                t.number("id").text("name").number("age").boolean("is_admin")
            })
            .build()
            .unwrap()
    }

    #[test]
    fn table_lookup() {
        let schema = users();
        let table = schema.table("users").unwrap();
        assert_eq!(table.name().as_str(), "users");
        assert_eq!(table.columns().len(), 4);
        assert_eq!(table.column("age").unwrap().ty(), ColumnType::Number);
    }

    #[test]
    fn unknown_table_is_schema_violation() {
        let schema = users();
        let err = schema.select("missing").unwrap_err();
        assert!(err.is_schema_violation());
        assert!(matches!(err, Error::UnknownTable(t) if t == "missing"));
    }

    #[test]
    fn unknown_column_is_schema_violation() {
        let schema = users();
        let table = schema.table("users").unwrap();
        let err = table.check_column("nickname").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownColumn { ref table, ref column }
                if table == "users" && column == "nickname"
        ));
    }

    #[test]
    fn column_type_admits() {
        assert!(ColumnType::Text.admits(&Value::Text("x".into())));
        assert!(ColumnType::Number.admits(&Value::Int(1)));
        assert!(ColumnType::Number.admits(&Value::Float(1.5)));
        assert!(ColumnType::Boolean.admits(&Value::Bool(true)));
        // NULL is admitted everywhere.
        assert!(ColumnType::Text.admits(&Value::Null));
        // Cross-type values are not.
        assert!(!ColumnType::Text.admits(&Value::Int(1)));
        assert!(!ColumnType::Boolean.admits(&Value::Text("true".into())));
    }

    #[test]
    fn invalid_column_name_fails_at_build() {
        let err = Schema::builder()
            .table("users", |t| t.text("bad name"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier(_)));
    }
}
