//! # dataapi-rs
//!
//! SQL driver for Aurora clusters reached through the AWS RDS Data API.
//!
//! The Data API is a stateless HTTPS service: every statement is one
//! `ExecuteStatement` call identified by a cluster ARN, a Secrets Manager
//! ARN and a database name. This crate wraps those calls in the usual
//! driver shapes (connection, statement, cursor, transaction) and can hand
//! results over as Apache Arrow record batches.
//!
//! ## Example
//!
//! ```no_run
//! # use dataapi_rs::*;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create driver and open database
//! let driver = Driver::new();
//! let database = driver.open("dataapi:arn:aws:cluster123|arn:aws:secret456|mydb")?;
//!
//! // Connect; credentials come from the default AWS provider chain
//! let mut connection = database.connect().await?;
//!
//! // Execute a query
//! let rows = connection
//!     .prepare("SELECT * FROM my_table WHERE created_at > :1")?
//!     .query(&["2024-01-01 00:00:00".into()])
//!     .await?;
//!
//! // Process as an Arrow RecordBatch
//! let batch = rows.to_record_batch()?;
//! println!("Rows: {}", batch.num_rows());
//!
//! // Close connection
//! connection.close().await;
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod arrow_conversion;
pub mod connection;
pub mod driver;
pub mod error;
pub mod transport;
pub mod types;

// Re-export public API
pub use arrow_conversion::ArrowConverter;
pub use connection::{ConnectionBuilder, ConnectionParams};
pub use driver::{
    Connection, Database, Driver, ExecResult, Rows, Statement, Transaction, TransactionState,
    DRIVER_NAME,
};
pub use error::{
    ConnectionError, ConversionError, DataApiError, ErrorCode, QueryError, TransportError,
};
pub use types::{Parameter, TypeMapper, Value};
