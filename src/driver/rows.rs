//! Row cursor over an ExecuteStatement response.

use super::traits::Cursor;
use crate::arrow_conversion::ArrowConverter;
use crate::error::{ConversionError, QueryError};
use crate::transport::messages::{ColumnMetadata, ExecutionResult, TaggedValue};
use crate::types::Value;
use arrow::array::RecordBatch;

/// Forward-only cursor over the rows of one response.
///
/// The whole response is held in memory; `close` releases it.
#[derive(Debug, Clone)]
pub struct Rows {
    columns: Vec<ColumnMetadata>,
    records: Option<Vec<Vec<TaggedValue>>>,
    position: usize,
}

impl Rows {
    pub(crate) fn new(result: ExecutionResult) -> Self {
        Self {
            columns: result.columns,
            records: Some(result.records),
            position: 0,
        }
    }

    /// Ordered column names; empty where the service sent no name.
    pub fn columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Ordered database type names of the columns.
    pub fn column_type_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.type_name.clone()).collect()
    }

    /// Number of rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.pending().len()
    }

    /// Fill `dest` with the next row and advance.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::ColumnCountMismatch` if `dest` is not exactly as
    /// wide as the result.
    pub fn next(&mut self, dest: &mut [Value]) -> Result<bool, QueryError> {
        let Some(row) = self.pending().first() else {
            return Ok(false);
        };

        let expected = if self.columns.is_empty() {
            row.len()
        } else {
            self.columns.len()
        };
        if dest.len() != expected {
            return Err(QueryError::ColumnCountMismatch {
                expected,
                actual: dest.len(),
            });
        }

        for (slot, field) in dest.iter_mut().zip(row) {
            *slot = Value::from(field);
        }
        self.position += 1;
        Ok(true)
    }

    /// Release the held response. Idempotent; `next` then reports end of data.
    pub fn close(&mut self) {
        self.records = None;
    }

    /// Check if the cursor was closed.
    pub fn is_closed(&self) -> bool {
        self.records.is_none()
    }

    /// Convert the rows not yet consumed into an Arrow RecordBatch.
    ///
    /// Consumes nothing; a closed cursor yields an empty batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch, ConversionError> {
        let pending = self.pending();
        ArrowConverter::new(&self.columns, pending).convert_records(pending)
    }

    fn pending(&self) -> &[Vec<TaggedValue>] {
        self.records
            .as_deref()
            .and_then(|records| records.get(self.position..))
            .unwrap_or(&[])
    }
}

impl Iterator for Rows {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.pending().first()?.iter().map(Value::from).collect();
        self.position += 1;
        Some(row)
    }
}

impl Cursor for Rows {
    fn columns(&self) -> Vec<String> {
        Rows::columns(self)
    }

    fn next(&mut self, dest: &mut [Value]) -> Result<bool, QueryError> {
        Rows::next(self, dest)
    }

    fn close(&mut self) {
        Rows::close(self)
    }
}
