//! Request and response types for the RDS Data API.
//!
//! These mirror the service's JSON shapes (camelCase field names, one key per
//! tagged value) so they can be logged or fixtured as the service sends them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A discriminated wire value, used both for statement parameters and for
/// result fields.
///
/// Exactly one variant is carried per value; SQL NULL is its own variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaggedValue {
    /// SQL NULL, on the wire as `{"isNull": true}`
    #[serde(
        rename = "isNull",
        serialize_with = "serialize_null_flag",
        deserialize_with = "deserialize_null_flag"
    )]
    Null,
    /// Binary data
    #[serde(rename = "blobValue")]
    Blob(Vec<u8>),
    /// Boolean
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    /// Double precision float
    #[serde(rename = "doubleValue")]
    Double(f64),
    /// 64-bit integer
    #[serde(rename = "longValue")]
    Long(i64),
    /// Text; also carries dates, timestamps and decimals
    #[serde(rename = "stringValue")]
    String(String),
}

impl TaggedValue {
    /// The SQL NULL value.
    pub fn null() -> Self {
        TaggedValue::Null
    }

    /// Check if this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, TaggedValue::Null)
    }

    /// Service tag name of this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            TaggedValue::Null => "isNull",
            TaggedValue::Blob(_) => "blobValue",
            TaggedValue::Boolean(_) => "booleanValue",
            TaggedValue::Double(_) => "doubleValue",
            TaggedValue::Long(_) => "longValue",
            TaggedValue::String(_) => "stringValue",
        }
    }
}

fn serialize_null_flag<S: Serializer>(serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(true)
}

fn deserialize_null_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
    if bool::deserialize(deserializer)? {
        Ok(())
    } else {
        Err(serde::de::Error::custom("isNull must be true"))
    }
}

/// A named statement parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlParameter {
    /// Parameter name; positional parameters use the 1-based index
    pub name: String,
    /// Parameter value
    pub value: TaggedValue,
}

impl SqlParameter {
    /// Create a new named parameter.
    pub fn new(name: impl Into<String>, value: TaggedValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// ExecuteStatement request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStatementRequest {
    /// Cluster ARN
    pub resource_arn: String,
    /// Secret ARN
    pub secret_arn: String,
    /// Database name
    pub database: String,
    /// SQL text, passed through verbatim
    pub sql: String,
    /// Named parameters
    pub parameters: Vec<SqlParameter>,
    /// Request column metadata in the response
    pub include_result_metadata: bool,
    /// Transaction to run in; auto-commit when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// BeginTransaction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginTransactionRequest {
    /// Cluster ARN
    pub resource_arn: String,
    /// Secret ARN
    pub secret_arn: String,
    /// Database name
    pub database: String,
}

/// CommitTransaction / RollbackTransaction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndTransactionRequest {
    /// Cluster ARN
    pub resource_arn: String,
    /// Secret ARN
    pub secret_arn: String,
    /// Transaction to end
    pub transaction_id: String,
}

/// Column metadata returned with a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    /// Column name (or label)
    #[serde(default)]
    pub name: String,
    /// Database type name, e.g. `int4` or `VARCHAR`
    #[serde(default)]
    pub type_name: String,
}

impl ColumnMetadata {
    /// Create column metadata.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Response to an ExecuteStatement call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Ordered column metadata, one entry per field in each record
    #[serde(default, rename = "columnMetadata")]
    pub columns: Vec<ColumnMetadata>,
    /// Ordered rows
    #[serde(default)]
    pub records: Vec<Vec<TaggedValue>>,
    /// Rows inserted, updated or deleted
    #[serde(default, rename = "numberOfRecordsUpdated")]
    pub rows_updated: i64,
}

impl ExecutionResult {
    /// Result of a statement that returns no rows.
    pub fn row_count(rows_updated: i64) -> Self {
        Self {
            rows_updated,
            ..Default::default()
        }
    }

    /// Result carrying rows.
    pub fn with_records(columns: Vec<ColumnMetadata>, records: Vec<Vec<TaggedValue>>) -> Self {
        Self {
            columns,
            records,
            rows_updated: 0,
        }
    }
}
