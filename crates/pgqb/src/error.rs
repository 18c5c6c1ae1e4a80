//! Error types for pgqb.

use thiserror::Error;

use crate::value::Value;

/// Result type alias for pgqb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing, serializing, or executing statements.
///
/// Everything except [`Error::Database`] is produced locally, before any SQL
/// text leaves the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Table is not present in the schema.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// Column is not present on the target table.
    #[error("unknown column {column} on table {table}")]
    UnknownColumn { table: String, column: String },

    /// Value does not fit the column's declared type.
    #[error("type mismatch for column {column}: expected {expected}, got {value:?}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        value: Value,
    },

    /// `where_` called while a condition is already attached.
    #[error("where_() called twice; use and_where()/or_where() for further conditions")]
    MisplacedWhere,

    /// A chained condition was attached before any first condition.
    #[error("{0}() called before where_()")]
    MissingWhere(&'static str),

    /// Insert with no rows or an empty row, update with no assignments,
    /// or an empty IN list.
    #[error("empty payload: {0}")]
    EmptyPayload(&'static str),

    /// Identifier failed validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Expected one row, got none.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Error surfaced unchanged from the database client.
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// Connection configuration error.
    #[cfg(feature = "pool")]
    #[error("connection error: {0}")]
    Connection(String),

    /// Pool build or checkout error.
    #[cfg(feature = "pool")]
    #[error("pool error: {0}")]
    Pool(String),
}

impl Error {
    /// Whether this is a schema violation (unknown table/column, type mismatch).
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Self::UnknownTable(_) | Self::UnknownColumn { .. } | Self::TypeMismatch { .. }
        )
    }

    /// Whether this is a clause-ordering violation.
    pub fn is_ordering_violation(&self) -> bool {
        matches!(self, Self::MisplacedWhere | Self::MissingWhere(_))
    }

    /// Whether this is an empty-payload error.
    pub fn is_empty_payload(&self) -> bool {
        matches!(self, Self::EmptyPayload(_))
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for Error {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
