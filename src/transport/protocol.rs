//! Transport protocol abstraction trait.
//!
//! This module defines the `DataApiTransport` trait that abstracts the remote
//! execution service. The production implementation is
//! [`SdkTransport`](super::SdkTransport); tests substitute in-memory fakes.

use crate::error::TransportError;
use async_trait::async_trait;

use super::messages::{
    BeginTransactionRequest, EndTransactionRequest, ExecuteStatementRequest, ExecutionResult,
};

/// The four remote calls this driver issues.
///
/// Every call is a single request/response round-trip. Implementations must
/// not retry and must surface service errors as
/// [`TransportError::Service`] with the service's message unchanged.
#[async_trait]
pub trait DataApiTransport: Send + Sync {
    /// Start a transaction.
    ///
    /// # Returns
    ///
    /// The service-issued transaction id.
    async fn begin_transaction(
        &self,
        request: &BeginTransactionRequest,
    ) -> Result<String, TransportError>;

    /// Commit a transaction.
    ///
    /// # Returns
    ///
    /// The transaction status reported by the service.
    async fn commit_transaction(
        &self,
        request: &EndTransactionRequest,
    ) -> Result<String, TransportError>;

    /// Roll back a transaction.
    ///
    /// # Returns
    ///
    /// The transaction status reported by the service.
    async fn rollback_transaction(
        &self,
        request: &EndTransactionRequest,
    ) -> Result<String, TransportError>;

    /// Execute one SQL statement.
    async fn execute_statement(
        &self,
        request: &ExecuteStatementRequest,
    ) -> Result<ExecutionResult, TransportError>;
}
