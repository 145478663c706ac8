//! Connection parameter parsing and validation.
//!
//! Two connection string grammars are accepted, dispatched on a structural
//! prefix check:
//!
//! - `dataapi:///<database>?clusterARN=<arn>&secretARN=<arn>[&region=..][&endpoint=..]`
//! - `dataapi:<clusterARN>|<secretARN>|<database>`

use crate::error::ConnectionError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Scheme prefix shared by both grammars.
pub const SCHEME: &str = "dataapi:";

const URL_PREFIX: &str = "dataapi://";

/// Connection parameters identifying the target cluster, credential and database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// ARN of the Aurora cluster (the Data API resource ARN)
    pub cluster_arn: String,

    /// ARN of the Secrets Manager secret holding the database credentials
    pub secret_arn: String,

    /// Target database name
    pub database: String,

    /// AWS region override; the SDK default chain applies when unset
    pub region: Option<String>,

    /// Endpoint URL override, e.g. for a local Data API emulator
    pub endpoint_url: Option<String>,
}

impl ConnectionParams {
    /// Create a new ConnectionBuilder.
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }
}

impl FromStr for ConnectionParams {
    type Err = ConnectionError;

    /// Parse a connection string in either accepted grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dataapi_rs::connection::ConnectionParams;
    /// # use std::str::FromStr;
    /// let params = ConnectionParams::from_str(
    ///     "dataapi:///mydb?clusterARN=arn:aws:cluster123&secretARN=arn:aws:secret456",
    /// )?;
    /// assert_eq!(params.database, "mydb");
    ///
    /// let params = ConnectionParams::from_str("dataapi:arn:aws:cluster123|arn:aws:secret456|mydb")?;
    /// assert_eq!(params.cluster_arn, "arn:aws:cluster123");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let conn = s.trim();

        if !conn.starts_with(SCHEME) {
            return Err(ConnectionError::ParseError(format!(
                "Expected connection string with the format \
                 'dataapi:///<database>?clusterARN=<cluster ARN>&secretARN=<secret ARN>' \
                 or 'dataapi:<cluster ARN>|<secret ARN>|<database>', got '{}'",
                conn
            )));
        }

        if conn.starts_with(URL_PREFIX) {
            parse_url_form(conn)
        } else {
            parse_pipe_form(conn)
        }
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dataapi:///{}?clusterARN={}&secretARN={}",
            urlencoding::encode(&self.database),
            urlencoding::encode(&self.cluster_arn),
            urlencoding::encode(&self.secret_arn)
        )?;
        if let Some(region) = &self.region {
            write!(f, "&region={}", urlencoding::encode(region))?;
        }
        if let Some(endpoint) = &self.endpoint_url {
            write!(f, "&endpoint={}", urlencoding::encode(endpoint))?;
        }
        Ok(())
    }
}

/// Builder for constructing ConnectionParams with validation.
#[derive(Debug, Clone, Default)]
pub struct ConnectionBuilder {
    cluster_arn: Option<String>,
    secret_arn: Option<String>,
    database: Option<String>,
    region: Option<String>,
    endpoint_url: Option<String>,
}

impl ConnectionBuilder {
    /// Create a new ConnectionBuilder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cluster ARN.
    pub fn cluster_arn(mut self, arn: &str) -> Self {
        self.cluster_arn = Some(arn.to_string());
        self
    }

    /// Set the secret ARN.
    pub fn secret_arn(mut self, arn: &str) -> Self {
        self.secret_arn = Some(arn.to_string());
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    /// Set the AWS region.
    pub fn region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    /// Set the service endpoint URL.
    pub fn endpoint_url(mut self, url: &str) -> Self {
        self.endpoint_url = Some(url.to_string());
        self
    }

    /// Build the ConnectionParams with validation.
    pub fn build(self) -> Result<ConnectionParams, ConnectionError> {
        Ok(ConnectionParams {
            cluster_arn: required(self.cluster_arn, "clusterARN")?,
            secret_arn: required(self.secret_arn, "secretARN")?,
            database: required(self.database, "database")?,
            region: self.region.filter(|r| !r.is_empty()),
            endpoint_url: self.endpoint_url.filter(|e| !e.is_empty()),
        })
    }
}

fn required(value: Option<String>, parameter: &str) -> Result<String, ConnectionError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConnectionError::InvalidParameter {
            parameter: parameter.to_string(),
            message: format!("Missing {} in connection string", parameter),
        }),
    }
}

/// `dataapi:///<database>?clusterARN=..&secretARN=..`
fn parse_url_form(conn: &str) -> Result<ConnectionParams, ConnectionError> {
    let rest = &conn[URL_PREFIX.len()..];

    let (path, query_string) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    let mut query = parse_query_params(query_string)?;

    // skip the authority, the database is the path
    let path = match path.find('/') {
        Some(idx) => &path[idx + 1..],
        None => "",
    };
    let database = urlencoding::decode(path)
        .map_err(|e| ConnectionError::ParseError(format!("Failed to decode database: {}", e)))?
        .into_owned();

    let mut builder = ConnectionBuilder::new().database(&database);
    if let Some(cluster) = query.remove("clusterARN") {
        builder = builder.cluster_arn(&cluster);
    }
    if let Some(secret) = query.remove("secretARN") {
        builder = builder.secret_arn(&secret);
    }
    if let Some(region) = query.remove("region") {
        builder = builder.region(&region);
    }
    if let Some(endpoint) = query.remove("endpoint") {
        builder = builder.endpoint_url(&endpoint);
    }

    for key in query.keys() {
        tracing::debug!(key = %key, "ignoring unknown connection string parameter");
    }

    builder.build()
}

/// `dataapi:<clusterARN>|<secretARN>|<database>`
fn parse_pipe_form(conn: &str) -> Result<ConnectionParams, ConnectionError> {
    let rest = &conn[SCHEME.len()..];
    let segments: Vec<&str> = rest.split('|').collect();

    if segments.len() != 3 {
        return Err(ConnectionError::ParseError(format!(
            "Expected 3 '|'-separated segments (clusterARN|secretARN|database), got {} in '{}'",
            segments.len(),
            conn
        )));
    }

    ConnectionBuilder::new()
        .cluster_arn(segments[0])
        .secret_arn(segments[1])
        .database(segments[2])
        .build()
}

/// Parse query parameters from URL query string.
fn parse_query_params(query: Option<&str>) -> Result<HashMap<String, String>, ConnectionError> {
    let mut params = HashMap::new();

    if let Some(query) = query {
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = pair.split_once('=').ok_or_else(|| {
                ConnectionError::ParseError(format!("Invalid query parameter format: {}", pair))
            })?;

            let key = urlencoding::decode(key)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode key: {}", e)))?
                .into_owned();
            let value = urlencoding::decode(value)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode value: {}", e)))?
                .into_owned();

            // first occurrence wins
            params.entry(key).or_insert(value);
        }
    }

    Ok(params)
}
