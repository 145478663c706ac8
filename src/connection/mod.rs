//! Connection parameters and per-connection session state.
//!
//! # Example
//!
//! ```
//! # use dataapi_rs::connection::{ConnectionBuilder, ConnectionParams};
//! # use std::str::FromStr;
//! // Using ConnectionBuilder
//! let params = ConnectionBuilder::new()
//!     .cluster_arn("arn:aws:rds:us-east-1:123456789012:cluster:demo")
//!     .secret_arn("arn:aws:secretsmanager:us-east-1:123456789012:secret:demo")
//!     .database("mydb")
//!     .build()?;
//!
//! // Or parse from connection string
//! let parsed = ConnectionParams::from_str(
//!     "dataapi:arn:aws:rds:us-east-1:123456789012:cluster:demo|arn:aws:secretsmanager:us-east-1:123456789012:secret:demo|mydb",
//! )?;
//! assert_eq!(params, parsed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod params;
pub mod session;

pub use params::{ConnectionBuilder, ConnectionParams, SCHEME};
pub use session::Session;
