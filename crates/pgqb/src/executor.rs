//! Bridges built statements to a database client.

use tokio_postgres::Row;

use crate::client::GenericClient;
use crate::error::Result;
use crate::qb::ToQuery;

/// Renders builders and runs the resulting statements on a [`GenericClient`].
///
/// The executor owns its client; wrap a `&Client` to borrow one instead,
/// since `GenericClient` is implemented for references.
#[derive(Debug)]
pub struct Executor<C> {
    client: C,
}

impl<C: GenericClient> Executor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    /// Render and run a statement, returning every row.
    pub async fn query(&self, builder: &impl ToQuery) -> Result<Vec<Row>> {
        let query = builder.to_query()?;
        tracing::debug!(sql = %query.sql, bindings = query.bindings.len(), "executing query");
        self.client.query(&query.sql, &query.params()).await
    }

    /// Render and run a statement, returning the first row, if any.
    pub async fn query_opt(&self, builder: &impl ToQuery) -> Result<Option<Row>> {
        let query = builder.to_query()?;
        tracing::debug!(sql = %query.sql, bindings = query.bindings.len(), "executing query");
        self.client.query_opt(&query.sql, &query.params()).await
    }

    /// Render and run a statement, returning the first row.
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) on an empty result.
    pub async fn query_one(&self, builder: &impl ToQuery) -> Result<Row> {
        let query = builder.to_query()?;
        tracing::debug!(sql = %query.sql, bindings = query.bindings.len(), "executing query");
        self.client.query_one(&query.sql, &query.params()).await
    }

    /// Render and run a statement, returning the affected row count.
    pub async fn execute(&self, builder: &impl ToQuery) -> Result<u64> {
        let query = builder.to_query()?;
        tracing::debug!(sql = %query.sql, bindings = query.bindings.len(), "executing statement");
        self.client.execute(&query.sql, &query.params()).await
    }
}
