//! Transport layer for RDS Data API communication.
//!
//! # Architecture
//!
//! The transport layer is organized into:
//! - `protocol` - `DataApiTransport` trait definition
//! - `messages` - Request/response and tagged value types
//! - `sdk` - Implementation over the AWS SDK
//!
//! # Example
//!
//! ```no_run
//! use dataapi_rs::connection::ConnectionParams;
//! use dataapi_rs::transport::{DataApiTransport, ExecuteStatementRequest, SdkTransport};
//! use std::str::FromStr;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = ConnectionParams::from_str("dataapi:arn:aws:cluster123|arn:aws:secret456|mydb")?;
//! let transport = SdkTransport::from_params(&params).await;
//!
//! let result = transport
//!     .execute_statement(&ExecuteStatementRequest {
//!         resource_arn: params.cluster_arn.clone(),
//!         secret_arn: params.secret_arn.clone(),
//!         database: params.database.clone(),
//!         sql: "SELECT 1".to_string(),
//!         parameters: Vec::new(),
//!         include_result_metadata: true,
//!         transaction_id: None,
//!     })
//!     .await?;
//! println!("{} rows", result.records.len());
//! # Ok(())
//! # }
//! ```

pub mod messages;
pub mod protocol;
pub mod sdk;

pub use messages::{
    BeginTransactionRequest, ColumnMetadata, EndTransactionRequest, ExecuteStatementRequest,
    ExecutionResult, SqlParameter, TaggedValue,
};
pub use protocol::DataApiTransport;
pub use sdk::SdkTransport;
