//! Result summary for statements executed with `exec`.

use super::traits::ResultSummary;
use crate::error::QueryError;

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    rows_updated: i64,
}

impl ExecResult {
    pub(crate) fn new(rows_updated: i64) -> Self {
        Self { rows_updated }
    }

    /// Rows inserted, updated or deleted, as reported by the service.
    pub fn rows_affected(&self) -> i64 {
        self.rows_updated
    }

    /// Always fails: the service has no channel for auto-generated ids.
    ///
    /// Use `RETURNING` (or an equivalent query) to read generated keys.
    pub fn last_insert_id(&self) -> Result<i64, QueryError> {
        Err(QueryError::NoLastInsertId)
    }
}

impl ResultSummary for ExecResult {
    fn rows_affected(&self) -> i64 {
        ExecResult::rows_affected(self)
    }

    fn last_insert_id(&self) -> Result<i64, QueryError> {
        ExecResult::last_insert_id(self)
    }
}
