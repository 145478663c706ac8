//! Statement execution.
//!
//! A `Statement` binds SQL text to a connection. Nothing is sent until it is
//! executed; each execution is one ExecuteStatement call carrying the
//! positional arguments as parameters named `1`, `2`, ... in order.

use super::result::ExecResult;
use super::rows::Rows;
use super::traits::Executor;
use crate::connection::{ConnectionParams, Session};
use crate::error::QueryError;
use crate::transport::messages::{ExecuteStatementRequest, ExecutionResult, SqlParameter};
use crate::transport::DataApiTransport;
use crate::types::Parameter;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// SQL text bound to a connection, executable any number of times.
///
/// # Example
///
/// ```no_run
/// use dataapi_rs::driver::Driver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let connection = Driver::new()
///     .connect("dataapi:arn:aws:cluster123|arn:aws:secret456|mydb")
///     .await?;
///
/// let insert = connection.prepare("INSERT INTO t (id, name) VALUES (:1, :2)")?;
/// insert.exec(&[1i64.into(), "alice".into()]).await?;
/// insert.exec(&[2i64.into(), "bob".into()]).await?;
/// # Ok(())
/// # }
/// ```
pub struct Statement {
    sql: String,
    params: Arc<ConnectionParams>,
    transport: Arc<dyn DataApiTransport>,
    session: Arc<Session>,
}

impl Statement {
    pub(crate) fn new(
        sql: impl Into<String>,
        params: Arc<ConnectionParams>,
        transport: Arc<dyn DataApiTransport>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            sql: sql.into(),
            params,
            transport,
            session,
        }
    }

    /// The SQL text, exactly as given.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Placeholder count. Always `None`: SQL text is never parsed locally.
    pub fn num_input(&self) -> Option<usize> {
        None
    }

    /// Execute for its effect and report the affected row count.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Closed` if the connection was closed and
    /// `QueryError::Remote` with the service's message if execution fails.
    pub async fn exec(&self, args: &[Parameter]) -> Result<ExecResult, QueryError> {
        let result = self.execute(args).await?;
        Ok(ExecResult::new(result.rows_updated))
    }

    /// Execute and return a cursor over the produced rows.
    ///
    /// # Errors
    ///
    /// Same as [`exec`](Self::exec).
    pub async fn query(&self, args: &[Parameter]) -> Result<Rows, QueryError> {
        let result = self.execute(args).await?;
        Ok(Rows::new(result))
    }

    /// Detach the statement from its connection. Purely local.
    pub fn close(self) {
        debug!(sql = %self.sql, "Statement closed");
    }

    async fn execute(&self, args: &[Parameter]) -> Result<ExecutionResult, QueryError> {
        self.session.validate_open()?;

        let parameters = args
            .iter()
            .enumerate()
            .map(|(idx, arg)| SqlParameter::new((idx + 1).to_string(), arg.to_tagged()))
            .collect();
        let transaction_id = self.session.active_transaction();

        let count = self.session.increment_statement_count();
        debug!(
            sql = %self.sql,
            parameters = args.len(),
            in_transaction = transaction_id.is_some(),
            statement = count,
            "Executing statement"
        );

        let request = ExecuteStatementRequest {
            resource_arn: self.params.cluster_arn.clone(),
            secret_arn: self.params.secret_arn.clone(),
            database: self.params.database.clone(),
            sql: self.sql.clone(),
            parameters,
            include_result_metadata: true,
            transaction_id,
        };

        Ok(self.transport.execute_statement(&request).await?)
    }
}

impl std::fmt::Debug for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statement")
            .field("sql", &self.sql)
            .field("database", &self.params.database)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Executor for Statement {
    type Summary = ExecResult;
    type Rows = Rows;

    fn num_input(&self) -> Option<usize> {
        Statement::num_input(self)
    }

    async fn exec(&self, args: &[Parameter]) -> Result<ExecResult, QueryError> {
        Statement::exec(self, args).await
    }

    async fn query(&self, args: &[Parameter]) -> Result<Rows, QueryError> {
        Statement::query(self, args).await
    }
}
