//! Capability traits.
//!
//! Each trait names one capability a SQL client layer needs from a driver.
//! The concrete types in this module tree implement them; code that wants to
//! stay generic over the backend can depend on the traits alone.

use crate::error::{ConnectionError, QueryError};
use crate::types::{Parameter, Value};
use async_trait::async_trait;

/// Establishes connections.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connection type produced by this connector.
    type Connection: Send;

    /// Open a new connection.
    async fn connect(&self) -> Result<Self::Connection, ConnectionError>;
}

/// Creates statements from SQL text.
pub trait Preparer {
    /// Statement type produced by this preparer.
    type Statement;

    /// Bind `sql` to this connection. Nothing is sent to the server.
    fn prepare(&self, sql: &str) -> Result<Self::Statement, ConnectionError>;
}

/// Executes a prepared statement.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Summary of a statement that returns no rows.
    type Summary: ResultSummary;
    /// Cursor over a statement's rows.
    type Rows: Cursor;

    /// Number of placeholders, or `None` if unknown.
    fn num_input(&self) -> Option<usize>;

    /// Execute for its effect.
    async fn exec(&self, args: &[Parameter]) -> Result<Self::Summary, QueryError>;

    /// Execute and return the produced rows.
    async fn query(&self, args: &[Parameter]) -> Result<Self::Rows, QueryError>;
}

/// Forward-only row cursor.
pub trait Cursor {
    /// Ordered column names.
    fn columns(&self) -> Vec<String>;

    /// Fill `dest` with the next row.
    ///
    /// Returns `Ok(false)` once the data is exhausted, leaving `dest` untouched.
    fn next(&mut self, dest: &mut [Value]) -> Result<bool, QueryError>;

    /// Release the cursor. Idempotent.
    fn close(&mut self);
}

/// Outcome of a statement that returns no rows.
pub trait ResultSummary {
    /// Rows inserted, updated or deleted.
    fn rows_affected(&self) -> i64;

    /// Auto-generated id of the last inserted row.
    fn last_insert_id(&self) -> Result<i64, QueryError>;
}

/// Ends a transaction.
#[async_trait]
pub trait Transactor: Send {
    /// Commit the transaction.
    async fn commit(&mut self) -> Result<(), QueryError>;

    /// Roll back the transaction.
    async fn rollback(&mut self) -> Result<(), QueryError>;
}
