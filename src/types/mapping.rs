//! Type mapping between Data API column type names and Apache Arrow data types.

use crate::transport::messages::TaggedValue;
use arrow::datatypes::DataType;
use std::collections::HashMap;

/// Field metadata key holding the database type name of a column.
pub const TYPE_NAME_METADATA_KEY: &str = "dataapi:type";

/// Type mapper for converting database type names into Arrow types.
///
/// Only the tags the service can carry have a native Arrow counterpart;
/// everything the service sends as text (decimals, dates, timestamps, JSON,
/// UUIDs, ...) maps to `Utf8`.
pub struct TypeMapper;

impl TypeMapper {
    /// Convert a database type name (as reported in column metadata) to an
    /// Arrow DataType.
    ///
    /// Matching is case-insensitive. Unknown and empty names map to `Utf8`.
    pub fn to_arrow(type_name: &str) -> DataType {
        match type_name.trim().to_ascii_lowercase().as_str() {
            "int" | "int2" | "int4" | "int8" | "integer" | "smallint" | "bigint" | "tinyint"
            | "mediumint" | "serial" | "serial4" | "serial8" | "smallserial" | "bigserial"
            | "oid" => DataType::Int64,

            "float" | "float4" | "float8" | "real" | "double" | "double precision" => {
                DataType::Float64
            }

            "bool" | "boolean" | "bit" => DataType::Boolean,

            "bytea" | "blob" | "tinyblob" | "mediumblob" | "longblob" | "binary"
            | "varbinary" => DataType::Binary,

            _ => DataType::Utf8,
        }
    }

    /// Arrow type that holds a single tagged value, used when no column
    /// metadata is available.
    ///
    /// Returns `None` for SQL NULL, which carries no type.
    pub fn from_tagged(value: &TaggedValue) -> Option<DataType> {
        match value {
            TaggedValue::Null => None,
            TaggedValue::Blob(_) => Some(DataType::Binary),
            TaggedValue::Boolean(_) => Some(DataType::Boolean),
            TaggedValue::Double(_) => Some(DataType::Float64),
            TaggedValue::Long(_) => Some(DataType::Int64),
            TaggedValue::String(_) => Some(DataType::Utf8),
        }
    }

    /// Create Arrow field metadata preserving the database type name.
    pub fn create_field_metadata(type_name: &str) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        if !type_name.is_empty() {
            metadata.insert(TYPE_NAME_METADATA_KEY.to_string(), type_name.to_string());
        }
        metadata
    }

    /// Recover the database type name from Arrow field metadata.
    pub fn from_field_metadata(metadata: &HashMap<String, String>) -> Option<&str> {
        metadata.get(TYPE_NAME_METADATA_KEY).map(String::as_str)
    }
}
