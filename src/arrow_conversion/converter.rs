//! Converter from row-major Data API results to an Arrow RecordBatch.

use crate::error::ConversionError;
use crate::transport::messages::{ColumnMetadata, ExecutionResult, TaggedValue};
use crate::types::TypeMapper;
use arrow::array::RecordBatch;
use arrow::datatypes::{DataType, Field, Schema};
use std::sync::Arc;

use super::builders::build_array;

/// Converter for transforming an [`ExecutionResult`] to an Arrow RecordBatch.
pub struct ArrowConverter {
    schema: Arc<Schema>,
}

impl ArrowConverter {
    /// Create a converter for the given column metadata.
    ///
    /// Column types come from [`TypeMapper::to_arrow`]. A column with no type
    /// name takes its type from the first non-null value in `records`.
    pub fn new(columns: &[ColumnMetadata], records: &[Vec<TaggedValue>]) -> Self {
        let fields: Vec<Field> = columns
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let data_type = if col.type_name.is_empty() {
                    infer_from_records(records, idx)
                } else {
                    TypeMapper::to_arrow(&col.type_name)
                };
                Field::new(&col.name, data_type, true)
                    .with_metadata(TypeMapper::create_field_metadata(&col.type_name))
            })
            .collect();

        Self {
            schema: Arc::new(Schema::new(fields)),
        }
    }

    /// Get the Arrow schema for this converter.
    pub fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    /// Convert `records` to a RecordBatch with this converter's schema.
    ///
    /// # Errors
    /// Returns `ConversionError` if a row's width differs from the schema or a
    /// value cannot be stored in its column's type.
    pub fn convert_records(
        &self,
        records: &[Vec<TaggedValue>],
    ) -> Result<RecordBatch, ConversionError> {
        let num_columns = self.schema.fields().len();
        if num_columns == 0 || records.is_empty() {
            return Ok(RecordBatch::new_empty(Arc::clone(&self.schema)));
        }

        for (row_idx, row) in records.iter().enumerate() {
            if row.len() != num_columns {
                return Err(ConversionError::ValueConversionFailed {
                    row: row_idx,
                    column: row.len().min(num_columns),
                    message: format!("row has {} values, expected {}", row.len(), num_columns),
                });
            }
        }

        let arrays = self
            .schema
            .fields()
            .iter()
            .enumerate()
            .map(|(col_idx, field)| {
                let column: Vec<&TaggedValue> = records.iter().map(|row| &row[col_idx]).collect();
                build_array(field.data_type(), &column, col_idx)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecordBatch::try_new(Arc::clone(&self.schema), arrays)?)
    }

    /// Convert a complete execution result in one step.
    pub fn to_record_batch(result: &ExecutionResult) -> Result<RecordBatch, ConversionError> {
        Self::new(&result.columns, &result.records).convert_records(&result.records)
    }
}

fn infer_from_records(records: &[Vec<TaggedValue>], column: usize) -> DataType {
    records
        .iter()
        .filter_map(|row| row.get(column))
        .find_map(TypeMapper::from_tagged)
        .unwrap_or(DataType::Utf8)
}
