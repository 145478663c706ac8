//! Mock transport shared by the unit tests of this module tree.

use crate::connection::ConnectionParams;
use crate::error::TransportError;
use crate::transport::messages::{
    BeginTransactionRequest, EndTransactionRequest, ExecuteStatementRequest, ExecutionResult,
};
use crate::transport::DataApiTransport;
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub Transport {}

    #[async_trait]
    impl DataApiTransport for Transport {
        async fn begin_transaction(&self, request: &BeginTransactionRequest) -> Result<String, TransportError>;
        async fn commit_transaction(&self, request: &EndTransactionRequest) -> Result<String, TransportError>;
        async fn rollback_transaction(&self, request: &EndTransactionRequest) -> Result<String, TransportError>;
        async fn execute_statement(&self, request: &ExecuteStatementRequest) -> Result<ExecutionResult, TransportError>;
    }
}

pub(crate) fn test_params() -> ConnectionParams {
    ConnectionParams::builder()
        .cluster_arn("arn:aws:cluster123")
        .secret_arn("arn:aws:secret456")
        .database("mydb")
        .build()
        .unwrap()
}
