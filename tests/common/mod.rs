//! Common test utilities for dataapi-rs tests.
//!
//! # In-memory transport
//!
//! [`RecordingTransport`] stands in for the RDS Data API. It records every
//! request it receives and answers from a script: queued execution results
//! or errors, and generated transaction ids (`tx-1`, `tx-2`, ...).
//!
//! # Live service
//!
//! Integration tests need an Aurora cluster with the Data API enabled and
//! AWS credentials resolvable by the default provider chain. Point them at
//! it with:
//!
//! | Environment Variable        | Example                                              |
//! |-----------------------------|------------------------------------------------------|
//! | `DATAAPI_CONNECTION_STRING` | `dataapi:arn:aws:rds:...:cluster:c\|arn:aws:secretsmanager:...\|mydb` |
//!
//! ```bash
//! DATAAPI_CONNECTION_STRING='dataapi:...' cargo test --test integration_tests -- --ignored
//! ```
//!
//! Tests create uniquely named tables and drop them when done.

#![allow(dead_code)]

use async_trait::async_trait;
use dataapi_rs::error::TransportError;
use dataapi_rs::transport::{
    BeginTransactionRequest, DataApiTransport, EndTransactionRequest, ExecuteStatementRequest,
    ExecutionResult,
};
use dataapi_rs::{Connection, Driver};
use std::collections::VecDeque;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

// ============================================================================
// Recording transport
// ============================================================================

/// Pipe-form connection string used by the in-memory tests.
pub const TEST_CONNECTION_STRING: &str = "dataapi:arn:aws:cluster123|arn:aws:secret456|mydb";

/// One request received by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Begin(BeginTransactionRequest),
    Commit(EndTransactionRequest),
    Rollback(EndTransactionRequest),
    Execute(ExecuteStatementRequest),
}

/// Scripted in-memory transport.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    results: Mutex<VecDeque<Result<ExecutionResult, TransportError>>>,
    end_failures: Mutex<VecDeque<TransportError>>,
    begin_failures: Mutex<VecDeque<TransportError>>,
    transactions: AtomicUsize,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the answer to the next ExecuteStatement call.
    ///
    /// Unscripted calls answer with an empty result.
    pub fn push_result(&self, result: ExecutionResult) {
        self.results.lock().unwrap().push_back(Ok(result));
    }

    /// Make the next ExecuteStatement call fail with a service error.
    pub fn push_error(&self, message: &str) {
        self.results
            .lock()
            .unwrap()
            .push_back(Err(service_error(message)));
    }

    /// Make the next BeginTransaction call fail with a service error.
    pub fn fail_next_begin(&self, message: &str) {
        self.begin_failures
            .lock()
            .unwrap()
            .push_back(service_error(message));
    }

    /// Make the next Commit/RollbackTransaction call fail with a service error.
    pub fn fail_next_end(&self, message: &str) {
        self.end_failures
            .lock()
            .unwrap()
            .push_back(service_error(message));
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the ExecuteStatement requests.
    pub fn executed(&self) -> Vec<ExecuteStatementRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Execute(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn end(&self) -> Result<String, TransportError> {
        match self.end_failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok("Transaction Committed".to_string()),
        }
    }
}

#[async_trait]
impl DataApiTransport for RecordingTransport {
    async fn begin_transaction(
        &self,
        request: &BeginTransactionRequest,
    ) -> Result<String, TransportError> {
        self.record(Call::Begin(request.clone()));
        if let Some(err) = self.begin_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        let n = self.transactions.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("tx-{}", n))
    }

    async fn commit_transaction(
        &self,
        request: &EndTransactionRequest,
    ) -> Result<String, TransportError> {
        self.record(Call::Commit(request.clone()));
        self.end()
    }

    async fn rollback_transaction(
        &self,
        request: &EndTransactionRequest,
    ) -> Result<String, TransportError> {
        self.record(Call::Rollback(request.clone()));
        self.end()
    }

    async fn execute_statement(
        &self,
        request: &ExecuteStatementRequest,
    ) -> Result<ExecutionResult, TransportError> {
        self.record(Call::Execute(request.clone()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ExecutionResult::default()))
    }
}

fn service_error(message: &str) -> TransportError {
    TransportError::Service {
        code: Some("BadRequestException".to_string()),
        message: message.to_string(),
    }
}

/// Open a connection to [`TEST_CONNECTION_STRING`] over `transport`.
pub fn connect(transport: &Arc<RecordingTransport>) -> Connection {
    Driver::new()
        .open(TEST_CONNECTION_STRING)
        .expect("test connection string should parse")
        .connect_with_transport(transport.clone())
}

// ============================================================================
// Live service configuration
// ============================================================================

/// Environment variable holding the live connection string.
pub const ENV_CONNECTION_STRING: &str = "DATAAPI_CONNECTION_STRING";

/// Live connection string, if configured.
pub fn get_test_connection_string() -> Option<String> {
    env::var(ENV_CONNECTION_STRING)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Check if a live service is configured.
pub fn is_dataapi_configured() -> bool {
    get_test_connection_string().is_some()
}

/// Connect to the configured live service.
pub async fn get_test_connection() -> Result<Connection, dataapi_rs::DataApiError> {
    let conn_string = get_test_connection_string().ok_or_else(|| {
        dataapi_rs::ConnectionError::ParseError(format!("{} is not set", ENV_CONNECTION_STRING))
    })?;
    Ok(Driver::new().connect(&conn_string).await?)
}

/// Skip a test if no live service is configured.
#[macro_export]
macro_rules! skip_if_no_dataapi {
    () => {
        if !$crate::common::is_dataapi_configured() {
            eprintln!(
                "Skipping test: {} is not set",
                $crate::common::ENV_CONNECTION_STRING
            );
            return;
        }
    };
}

/// Generate a unique test table name.
pub fn generate_test_table_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("dataapi_rs_test_{}", nanos)
}
