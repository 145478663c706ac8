//! Transaction state machine.
//!
//! A `Transaction` owns the service-issued transaction id. While it is
//! active the id also sits in the connection's session, so every statement
//! executed on that connection runs inside the transaction.

use super::traits::Transactor;
use crate::connection::{ConnectionParams, Session};
use crate::error::{QueryError, TransportError};
use crate::transport::messages::EndTransactionRequest;
use crate::transport::DataApiTransport;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionState {
    /// Open on the service
    Active { id: String },
    /// Committed successfully
    Committed,
    /// Rolled back successfully
    RolledBack,
    /// Commit or rollback was attempted and failed
    Failed { id: String },
}

impl TransactionState {
    /// Check if the transaction can still be ended.
    pub fn is_active(&self) -> bool {
        matches!(self, TransactionState::Active { .. })
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Commit,
    Rollback,
}

/// An open transaction on a connection.
///
/// Obtained from [`Connection::begin`](super::Connection::begin). Committing
/// or rolling back ends it; both clear the connection's transaction slot
/// whatever the service answers.
pub struct Transaction {
    state: TransactionState,
    params: Arc<ConnectionParams>,
    transport: Arc<dyn DataApiTransport>,
    session: Arc<Session>,
}

impl Transaction {
    pub(crate) fn new(
        id: String,
        params: Arc<ConnectionParams>,
        transport: Arc<dyn DataApiTransport>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            state: TransactionState::Active { id },
            params,
            transport,
            session,
        }
    }

    /// Current state.
    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    /// Service-issued id; `None` once the transaction ended successfully.
    pub fn id(&self) -> Option<&str> {
        match &self.state {
            TransactionState::Active { id } | TransactionState::Failed { id } => Some(id),
            TransactionState::Committed | TransactionState::RolledBack => None,
        }
    }

    /// Commit the transaction.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::TransactionClosed` without contacting the service
    /// if the transaction is no longer active, and `QueryError::Remote` if
    /// the service rejects the commit. In the latter case the transaction is
    /// left in `Failed`.
    pub async fn commit(&mut self) -> Result<(), QueryError> {
        self.end(Outcome::Commit).await
    }

    /// Roll back the transaction.
    ///
    /// # Errors
    ///
    /// Same as [`commit`](Self::commit).
    pub async fn rollback(&mut self) -> Result<(), QueryError> {
        self.end(Outcome::Rollback).await
    }

    async fn end(&mut self, outcome: Outcome) -> Result<(), QueryError> {
        let id = match &self.state {
            TransactionState::Active { id } => id.clone(),
            _ => return Err(QueryError::TransactionClosed),
        };

        if let Err(e) = self.session.validate_open() {
            self.state = TransactionState::Failed { id };
            return Err(e.into());
        }

        let request = EndTransactionRequest {
            resource_arn: self.params.cluster_arn.clone(),
            secret_arn: self.params.secret_arn.clone(),
            transaction_id: id.clone(),
        };

        let response = match outcome {
            Outcome::Commit => self.transport.commit_transaction(&request).await,
            Outcome::Rollback => self.transport.rollback_transaction(&request).await,
        };
        self.session.clear_transaction(&id);

        self.state = Self::next_state(outcome, id, &response);
        let status = response?;
        debug!(?outcome, status = %status, "Transaction ended");
        Ok(())
    }

    fn next_state(
        outcome: Outcome,
        id: String,
        response: &Result<String, TransportError>,
    ) -> TransactionState {
        match (outcome, response) {
            (_, Err(_)) => TransactionState::Failed { id },
            (Outcome::Commit, Ok(_)) => TransactionState::Committed,
            (Outcome::Rollback, Ok(_)) => TransactionState::RolledBack,
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if let TransactionState::Active { id } = &self.state {
            warn!(
                transaction_id = %id,
                "Transaction dropped while active; it stays open until the service times it out"
            );
            self.session.clear_transaction(id);
        }
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transactor for Transaction {
    async fn commit(&mut self) -> Result<(), QueryError> {
        Transaction::commit(self).await
    }

    async fn rollback(&mut self) -> Result<(), QueryError> {
        Transaction::rollback(self).await
    }
}
