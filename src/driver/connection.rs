//! Connection to a database through the RDS Data API.
//!
//! The service is stateless per request, so a connection is only the parsed
//! parameters, a client handle and the session slot tracking the open
//! transaction. Opening one sends nothing.

use super::statement::Statement;
use super::traits::Preparer;
use super::transaction::Transaction;
use crate::connection::{ConnectionParams, Session};
use crate::error::{ConnectionError, QueryError};
use crate::transport::messages::{BeginTransactionRequest, EndTransactionRequest};
use crate::transport::{DataApiTransport, SdkTransport};
use std::sync::Arc;
use tracing::{debug, warn};

/// Connection to one database on one cluster.
///
/// # Example
///
/// ```no_run
/// use dataapi_rs::driver::Driver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut connection = Driver::new()
///     .connect("dataapi:arn:aws:cluster123|arn:aws:secret456|mydb")
///     .await?;
///
/// let mut tx = connection.begin().await?;
/// connection
///     .prepare("UPDATE accounts SET balance = balance - 10 WHERE id = :1")?
///     .exec(&[7i64.into()])
///     .await?;
/// tx.commit().await?;
///
/// connection.close().await;
/// # Ok(())
/// # }
/// ```
pub struct Connection {
    params: Arc<ConnectionParams>,
    transport: Option<Arc<dyn DataApiTransport>>,
    session: Arc<Session>,
}

impl Connection {
    /// Create a connection backed by the AWS SDK.
    ///
    /// Credentials and, unless `params.region` is set, the region come from
    /// the default AWS provider chain.
    pub async fn from_params(params: ConnectionParams) -> Self {
        let transport = SdkTransport::from_params(&params).await;
        Self::with_transport(params, Arc::new(transport))
    }

    /// Create a connection over any transport.
    pub fn with_transport(params: ConnectionParams, transport: Arc<dyn DataApiTransport>) -> Self {
        debug!(
            cluster_arn = %params.cluster_arn,
            database = %params.database,
            "Connection opened"
        );
        Self {
            params: Arc::new(params),
            transport: Some(transport),
            session: Arc::new(Session::new()),
        }
    }

    /// Bind SQL text to this connection. Nothing is sent to the service.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::ConnectionClosed` after [`close`](Self::close).
    pub fn prepare(&self, sql: impl Into<String>) -> Result<Statement, ConnectionError> {
        let transport = self.transport()?;
        Ok(Statement::new(
            sql,
            Arc::clone(&self.params),
            transport,
            Arc::clone(&self.session),
        ))
    }

    /// Start a transaction.
    ///
    /// Statements executed on this connection run inside it until it is
    /// committed, rolled back or dropped.
    ///
    /// # Errors
    ///
    /// - `QueryError::TransactionAlreadyActive` if a transaction is open;
    ///   the service is not contacted.
    /// - `QueryError::Remote` if the service refuses to begin one.
    /// - `QueryError::Closed` after [`close`](Self::close).
    pub async fn begin(&self) -> Result<Transaction, QueryError> {
        let transport = self.transport()?;
        if self.session.in_transaction() {
            return Err(QueryError::TransactionAlreadyActive);
        }

        let request = BeginTransactionRequest {
            resource_arn: self.params.cluster_arn.clone(),
            secret_arn: self.params.secret_arn.clone(),
            database: self.params.database.clone(),
        };
        let id = transport.begin_transaction(&request).await?;

        if !self.session.set_active_transaction(id.clone()) {
            // a concurrent begin won the slot
            let request = EndTransactionRequest {
                resource_arn: self.params.cluster_arn.clone(),
                secret_arn: self.params.secret_arn.clone(),
                transaction_id: id,
            };
            if let Err(e) = transport.rollback_transaction(&request).await {
                warn!(error = %e, "Failed to roll back surplus transaction");
            }
            return Err(QueryError::TransactionAlreadyActive);
        }

        debug!(transaction_id = %id, "Transaction started");
        Ok(Transaction::new(
            id,
            Arc::clone(&self.params),
            transport,
            Arc::clone(&self.session),
        ))
    }

    /// Check if a transaction is currently open on this connection.
    pub fn in_transaction(&self) -> bool {
        self.session.in_transaction()
    }

    /// Get the connection parameters.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Shared session state.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Check if the connection is closed.
    pub fn is_closed(&self) -> bool {
        self.transport.is_none()
    }

    /// Close the connection.
    ///
    /// Drops this connection's client handle and forgets any open
    /// transaction; the remote transaction is left to the service's timeout.
    /// Statements and transactions created from this connection keep their
    /// own handle until they are dropped, but fail with `ConnectionClosed`
    /// without contacting the service. Calling this again does nothing.
    pub async fn close(&mut self) {
        if self.transport.take().is_none() {
            return;
        }
        if let Some(id) = self.session.active_transaction() {
            warn!(transaction_id = %id, "Connection closed with an open transaction");
        }
        self.session.close();
        debug!(
            statements = self.session.statement_count(),
            "Connection closed"
        );
    }

    fn transport(&self) -> Result<Arc<dyn DataApiTransport>, ConnectionError> {
        self.transport
            .as_ref()
            .map(Arc::clone)
            .ok_or(ConnectionError::ConnectionClosed)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("params", &self.params)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Preparer for Connection {
    type Statement = Statement;

    fn prepare(&self, sql: &str) -> Result<Statement, ConnectionError> {
        Connection::prepare(self, sql)
    }
}
