//! Array builders for converting tagged values to Arrow arrays.
//!
//! Each builder takes one column of tagged values (one per row) and produces
//! an Arrow array with NULLs preserved.

use crate::error::ConversionError;
use crate::transport::messages::TaggedValue;
use arrow::array::{
    ArrayRef, BinaryBuilder, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder,
};
use arrow::datatypes::DataType;
use std::sync::Arc;

/// Build an Arrow array from one column of tagged values.
///
/// # Arguments
/// * `data_type` - Target Arrow type, as chosen by [`TypeMapper`](crate::types::TypeMapper)
/// * `values` - Column of tagged values (one per row)
/// * `column` - Column index for error reporting
///
/// # Errors
/// Returns `ConversionError::ValueConversionFailed` when a value's tag cannot
/// be stored in `data_type`.
pub fn build_array(
    data_type: &DataType,
    values: &[&TaggedValue],
    column: usize,
) -> Result<ArrayRef, ConversionError> {
    match data_type {
        DataType::Int64 => build_int64_array(values, column),
        DataType::Float64 => build_float64_array(values, column),
        DataType::Boolean => build_boolean_array(values, column),
        DataType::Binary => build_binary_array(values, column),
        DataType::Utf8 => build_string_array(values, column),
        other => Err(ConversionError::ArrowError(format!(
            "unsupported target type {other} for column {column}"
        ))),
    }
}

fn mismatch(value: &TaggedValue, expected: &str, row: usize, column: usize) -> ConversionError {
    ConversionError::ValueConversionFailed {
        row,
        column,
        message: format!("expected {}, got {}", expected, value.tag()),
    }
}

fn build_int64_array(values: &[&TaggedValue], column: usize) -> Result<ArrayRef, ConversionError> {
    let mut builder = Int64Builder::with_capacity(values.len());

    for (row, value) in values.iter().enumerate() {
        match value {
            TaggedValue::Null => builder.append_null(),
            TaggedValue::Long(i) => builder.append_value(*i),
            other => return Err(mismatch(other, "longValue", row, column)),
        }
    }

    Ok(Arc::new(builder.finish()))
}

fn build_float64_array(
    values: &[&TaggedValue],
    column: usize,
) -> Result<ArrayRef, ConversionError> {
    let mut builder = Float64Builder::with_capacity(values.len());

    for (row, value) in values.iter().enumerate() {
        match value {
            TaggedValue::Null => builder.append_null(),
            TaggedValue::Double(f) => builder.append_value(*f),
            // whole-valued floats may arrive as longs
            TaggedValue::Long(i) => builder.append_value(*i as f64),
            other => return Err(mismatch(other, "doubleValue", row, column)),
        }
    }

    Ok(Arc::new(builder.finish()))
}

fn build_boolean_array(
    values: &[&TaggedValue],
    column: usize,
) -> Result<ArrayRef, ConversionError> {
    let mut builder = BooleanBuilder::with_capacity(values.len());

    for (row, value) in values.iter().enumerate() {
        match value {
            TaggedValue::Null => builder.append_null(),
            TaggedValue::Boolean(b) => builder.append_value(*b),
            other => return Err(mismatch(other, "booleanValue", row, column)),
        }
    }

    Ok(Arc::new(builder.finish()))
}

fn build_binary_array(
    values: &[&TaggedValue],
    column: usize,
) -> Result<ArrayRef, ConversionError> {
    let mut builder = BinaryBuilder::with_capacity(values.len(), 0);

    for (row, value) in values.iter().enumerate() {
        match value {
            TaggedValue::Null => builder.append_null(),
            TaggedValue::Blob(b) => builder.append_value(b),
            other => return Err(mismatch(other, "blobValue", row, column)),
        }
    }

    Ok(Arc::new(builder.finish()))
}

/// Text columns accept any scalar tag; non-string scalars are rendered.
fn build_string_array(
    values: &[&TaggedValue],
    column: usize,
) -> Result<ArrayRef, ConversionError> {
    let mut builder = StringBuilder::with_capacity(values.len(), 0);

    for (row, value) in values.iter().enumerate() {
        match value {
            TaggedValue::Null => builder.append_null(),
            TaggedValue::String(s) => builder.append_value(s),
            TaggedValue::Long(i) => builder.append_value(i.to_string()),
            TaggedValue::Double(f) => builder.append_value(f.to_string()),
            TaggedValue::Boolean(b) => builder.append_value(b.to_string()),
            other => return Err(mismatch(other, "stringValue", row, column)),
        }
    }

    Ok(Arc::new(builder.finish()))
}
