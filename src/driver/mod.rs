//! Driver, connection, statement, cursor and transaction types.
//!
//! # Example
//!
//! ```no_run
//! use dataapi_rs::driver::Driver;
//! use dataapi_rs::types::Value;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut connection = Driver::new()
//!     .connect("dataapi:arn:aws:cluster123|arn:aws:secret456|mydb")
//!     .await?;
//!
//! let mut rows = connection
//!     .prepare("SELECT id, name FROM users WHERE id > :1")?
//!     .query(&[10i64.into()])
//!     .await?;
//!
//! let mut row = vec![Value::Null; rows.columns().len()];
//! while rows.next(&mut row)? {
//!     println!("{:?}", row);
//! }
//!
//! connection.close().await;
//! # Ok(())
//! # }
//! ```

mod connection;
mod database;
mod factory;
mod result;
mod rows;
mod statement;
mod traits;
mod transaction;

#[cfg(test)]
pub(crate) mod mock;

pub use connection::Connection;
pub use database::Database;
pub use factory::{Driver, DRIVER_NAME};
pub use result::ExecResult;
pub use rows::Rows;
pub use statement::Statement;
pub use traits::{Connector, Cursor, Executor, Preparer, ResultSummary, Transactor};
pub use transaction::{Transaction, TransactionState};
