//! # pgqb
//!
//! A schema-checked SQL statement builder for Postgres.
//!
//! ## Features
//!
//! - **Schema up front**: tables and columns are declared once, and every
//!   builder call is validated against them at the call site
//! - **Positional bindings**: placeholders are numbered `$1..$n` in binding
//!   order across all clauses of a statement, never interpolated into SQL text
//! - **Explicit conditions**: the first condition is attached with `where_`,
//!   later ones with `and_where`/`or_where`, and out-of-order calls fail fast
//! - **Thin execution**: an [`Executor`] runs built statements on anything
//!   implementing [`GenericClient`], including transactions
//!
//! ## Building statements
//!
//! ```
//! use pgqb::{Op, Row, Schema, ToQuery, Value};
//!
//! # fn main() -> pgqb::Result<()> {
//! let schema = Schema::builder()
//!     .table("users", |t| t.number("id").text("name").number("age"))
//!     .build()?;
//!
//! let select = schema
//!     .select("users")?
//!     .columns(&["name", "age"])?
//!     .where_("id", Op::eq(1))?
//!     .to_query()?;
//! assert_eq!(select.sql, "SELECT name, age FROM users WHERE id = $1");
//! assert_eq!(select.bindings, vec![Value::Int(1)]);
//!
//! let insert = schema
//!     .insert("users")?
//!     .values(Row::new().set("name", "a").set("age", 1))?
//!     .values(Row::new().set("name", "b"))?
//!     .to_query()?;
//! assert_eq!(
//!     insert.sql,
//!     "INSERT INTO users (name, age) VALUES ($1, $2), ($3, DEFAULT)"
//! );
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod executor;
pub mod ident;
pub mod qb;
pub mod schema;
pub mod value;

pub use client::GenericClient;
pub use error::{Error, Result};
pub use executor::Executor;
pub use ident::{Ident, Quoting};
pub use qb::{
    Connector, DeleteBuilder, InsertBuilder, NullOp, Op, Query, Row, SelectBuilder, ToQuery,
    UpdateBuilder,
};
pub use schema::{ColumnDef, ColumnType, Schema, SchemaBuilder, TableBuilder, TableDef};
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config, create_pool_with_tls};
