//! Error types for dataapi-rs.
//!
//! This module defines domain-specific error types organized by functional area.
//! Errors raised by the remote service are carried through unchanged inside
//! [`TransportError`], so callers see the service's own text.

use std::fmt;
use thiserror::Error;

/// Top-level error type encompassing all possible errors.
#[derive(Error, Debug)]
pub enum DataApiError {
    /// Connection-related errors
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Query execution errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Data conversion errors
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Transport errors
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors related to connection strings and connection lifecycle.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Connection string parsing error
    #[error("Failed to parse connection string: {0}")]
    ParseError(String),

    /// Invalid connection parameters
    #[error("Invalid connection parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Connection is closed
    #[error("Connection is closed")]
    ConnectionClosed,
}

/// Errors related to statement execution and transactions.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Error reported by the remote service, passed through verbatim
    #[error(transparent)]
    Remote(#[from] TransportError),

    /// The connection backing this operation is closed
    #[error(transparent)]
    Closed(#[from] ConnectionError),

    /// The service has no channel for auto-generated ids
    #[error("no LastInsertId available after the statement")]
    NoLastInsertId,

    /// Commit or rollback on a transaction that already ended
    #[error("Transaction has already been committed or rolled back")]
    TransactionClosed,

    /// Begin while another transaction is open on the connection
    #[error("A transaction is already active on this connection")]
    TransactionAlreadyActive,

    /// Destination row buffer does not match the column count
    #[error("Row buffer has {actual} slots but the result has {expected} columns")]
    ColumnCountMismatch { expected: usize, actual: usize },
}

/// Errors related to data type conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Failed to convert value
    #[error("Failed to convert value at row {row}, column {column}: {message}")]
    ValueConversionFailed {
        row: usize,
        column: usize,
        message: String,
    },

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(String),
}

/// Errors raised while talking to the remote service.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Error returned by the service (auth, SQL, transaction-not-found, ...)
    #[error("{message}")]
    Service {
        code: Option<String>,
        message: String,
    },

    /// The request never produced a service response (network, credentials, timeout)
    #[error("{0}")]
    Dispatch(String),

    /// The service responded with a payload this driver cannot represent
    #[error("Invalid service response: {0}")]
    InvalidResponse(String),
}

/// Coarse error classification for callers that bucket failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Connection error
    Connection = 1,
    /// Error reported by the remote service
    Remote = 2,
    /// Invalid argument
    InvalidArgument = 3,
    /// Invalid state
    InvalidState = 4,
    /// Not implemented
    NotImplemented = 5,
    /// Value conversion error
    Conversion = 6,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Connection => write!(f, "CONNECTION"),
            ErrorCode::Remote => write!(f, "REMOTE"),
            ErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            ErrorCode::InvalidState => write!(f, "INVALID_STATE"),
            ErrorCode::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
            ErrorCode::Conversion => write!(f, "CONVERSION"),
        }
    }
}

impl DataApiError {
    /// Map to an error code.
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            DataApiError::Connection(e) => e.to_error_code(),
            DataApiError::Query(e) => e.to_error_code(),
            DataApiError::Conversion(_) => ErrorCode::Conversion,
            DataApiError::Transport(e) => e.to_error_code(),
        }
    }
}

impl ConnectionError {
    /// Map to an error code.
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            ConnectionError::ParseError(_) | ConnectionError::InvalidParameter { .. } => {
                ErrorCode::InvalidArgument
            }
            ConnectionError::ConnectionClosed => ErrorCode::InvalidState,
        }
    }
}

impl QueryError {
    /// Map to an error code.
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            QueryError::Remote(e) => e.to_error_code(),
            QueryError::Closed(e) => e.to_error_code(),
            QueryError::NoLastInsertId => ErrorCode::NotImplemented,
            QueryError::TransactionClosed | QueryError::TransactionAlreadyActive => {
                ErrorCode::InvalidState
            }
            QueryError::ColumnCountMismatch { .. } => ErrorCode::InvalidArgument,
        }
    }
}

impl TransportError {
    /// Map to an error code.
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            TransportError::Service { .. } => ErrorCode::Remote,
            TransportError::Dispatch(_) => ErrorCode::Connection,
            TransportError::InvalidResponse(_) => ErrorCode::Conversion,
        }
    }
}

impl From<arrow::error::ArrowError> for ConversionError {
    fn from(err: arrow::error::ArrowError) -> Self {
        ConversionError::ArrowError(err.to_string())
    }
}
