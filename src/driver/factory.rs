//! Driver entry point.
//!
//! This module provides the `Driver` type which carries metadata about the
//! driver and serves as a factory for `Database` instances. Nothing is
//! registered globally; callers construct a `Driver` where they need one.

use super::connection::Connection;
use super::database::Database;
use crate::error::ConnectionError;
use std::str::FromStr;

/// Name under which this driver is known.
pub const DRIVER_NAME: &str = "dataapi";

/// Driver for databases reached through the RDS Data API.
///
/// # Example
///
/// ```
/// use dataapi_rs::driver::{Driver, DRIVER_NAME};
///
/// let driver = Driver::new();
/// assert_eq!(driver.name(), DRIVER_NAME);
/// println!("Driver: {} v{}", driver.name(), driver.version());
/// ```
#[derive(Debug, Clone)]
pub struct Driver {
    /// Driver name
    name: String,
    /// Driver version
    version: String,
    /// Vendor name
    vendor: String,
    /// Driver description
    description: String,
}

impl Driver {
    /// Create a new Driver instance.
    pub fn new() -> Self {
        Self {
            name: DRIVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            vendor: "dataapi-rs contributors".to_string(),
            description: "SQL driver for Aurora clusters over the RDS Data API".to_string(),
        }
    }

    /// Get the driver name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the driver version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the vendor name.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Get the driver description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parse a connection string into a connection factory.
    ///
    /// Accepts `dataapi:<clusterARN>|<secretARN>|<database>` and
    /// `dataapi:///<database>?clusterARN=<arn>&secretARN=<arn>[&region=..][&endpoint=..]`.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the connection string is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use dataapi_rs::driver::Driver;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let database = Driver::new().open("dataapi:arn:aws:cluster123|arn:aws:secret456|mydb")?;
    /// assert_eq!(database.params().database, "mydb");
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(&self, connection_string: &str) -> Result<Database, ConnectionError> {
        Database::from_str(connection_string)
    }

    /// Parse a connection string and connect in one step.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the connection string is invalid.
    pub async fn connect(&self, connection_string: &str) -> Result<Connection, ConnectionError> {
        self.open(connection_string)?.connect().await
    }

    /// Check if a connection string is valid, without connecting.
    ///
    /// # Example
    ///
    /// ```
    /// use dataapi_rs::driver::Driver;
    ///
    /// let driver = Driver::new();
    /// assert!(driver.validate_connection_string("dataapi:arn:c|arn:s|db"));
    /// assert!(!driver.validate_connection_string("dataapi:arn:c|arn:s"));
    /// ```
    pub fn validate_connection_string(&self, connection_string: &str) -> bool {
        Database::from_str(connection_string).is_ok()
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} ({})", self.name, self.version, self.vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_creation() {
        let driver = Driver::new();
        assert_eq!(driver.name(), "dataapi");
        assert_eq!(driver.vendor(), "dataapi-rs contributors");
        assert!(!driver.version().is_empty());
        assert!(!driver.description().is_empty());
    }

    #[test]
    fn test_driver_default() {
        assert_eq!(Driver::default().name(), DRIVER_NAME);
    }

    #[test]
    fn test_driver_display() {
        let display = Driver::new().to_string();
        assert!(display.starts_with("dataapi v"));
        assert!(display.contains("contributors"));
    }

    #[test]
    fn test_driver_open_valid() {
        let database = Driver::new()
            .open("dataapi:arn:aws:cluster123|arn:aws:secret456|mydb")
            .unwrap();
        assert_eq!(database.params().cluster_arn, "arn:aws:cluster123");
    }

    #[test]
    fn test_driver_open_invalid() {
        let err = Driver::new().open("dataapi:arn:c||db").unwrap_err();
        assert!(err.to_string().contains("Missing secretARN in connection string"));
    }

    #[test]
    fn test_validate_connection_string() {
        let driver = Driver::new();

        assert!(driver.validate_connection_string("dataapi:arn:c|arn:s|db"));
        assert!(driver.validate_connection_string(
            "dataapi:///db?secretARN=arn:s&clusterARN=arn:c"
        ));

        assert!(!driver.validate_connection_string(""));
        assert!(!driver.validate_connection_string("dataapi:arn:c|arn:s|db|extra"));
        assert!(!driver.validate_connection_string("postgres://user@host"));
        assert!(!driver.validate_connection_string("dataapi:///db?clusterARN=arn:c"));
    }
}
