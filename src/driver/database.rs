//! Database connection factory.
//!
//! A `Database` holds parsed connection parameters and creates connections
//! from them.

use super::connection::Connection;
use super::traits::Connector;
use crate::connection::params::ConnectionParams;
use crate::error::ConnectionError;
use crate::transport::DataApiTransport;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;

/// Connection factory for one database on one cluster.
///
/// # Example
///
/// ```no_run
/// use dataapi_rs::driver::Database;
/// use std::str::FromStr;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let database = Database::from_str(
///     "dataapi:///mydb?clusterARN=arn:aws:cluster123&secretARN=arn:aws:secret456&region=eu-west-1",
/// )?;
/// let connection = database.connect().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// Connection parameters
    params: ConnectionParams,
    /// Canonical connection string
    connection_string: String,
}

impl Database {
    /// Create a new Database instance from connection parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use dataapi_rs::connection::ConnectionBuilder;
    /// use dataapi_rs::driver::Database;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let params = ConnectionBuilder::new()
    ///     .cluster_arn("arn:aws:cluster123")
    ///     .secret_arn("arn:aws:secret456")
    ///     .database("mydb")
    ///     .build()?;
    ///
    /// let database = Database::new(params);
    /// assert!(database.connection_string().starts_with("dataapi:///mydb?"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(params: ConnectionParams) -> Self {
        let connection_string = params.to_string();
        Self {
            params,
            connection_string,
        }
    }

    /// Get the connection parameters.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Get the connection string in its URL form.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Create a connection backed by the AWS SDK.
    ///
    /// Loads the shared AWS configuration; no request is sent to the service.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for transports whose
    /// setup can fail.
    pub async fn connect(&self) -> Result<Connection, ConnectionError> {
        Ok(Connection::from_params(self.params.clone()).await)
    }

    /// Create a connection over the given transport.
    pub fn connect_with_transport(&self, transport: Arc<dyn DataApiTransport>) -> Connection {
        Connection::with_transport(self.params.clone(), transport)
    }
}

impl FromStr for Database {
    type Err = ConnectionError;

    /// Parse a connection string in either the pipe form
    /// `dataapi:<clusterARN>|<secretARN>|<database>` or the URL form
    /// `dataapi:///<database>?clusterARN=...&secretARN=...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let params = ConnectionParams::from_str(s)?;
        Ok(Self::new(params))
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Database({})", self.connection_string)
    }
}

#[async_trait]
impl Connector for Database {
    type Connection = Connection;

    async fn connect(&self) -> Result<Connection, ConnectionError> {
        Database::connect(self).await
    }
}
