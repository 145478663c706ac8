//! Per-connection session state.
//!
//! The session is shared by a connection and every statement and transaction
//! created from it. It holds the identifier of the transaction currently open
//! on the service, if any, and whether the connection has been closed.

use crate::error::ConnectionError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Shared state of one logical connection.
#[derive(Debug, Default)]
pub struct Session {
    /// Id of the open remote transaction. The guard is never held across
    /// an `.await`, so `Drop` impls can always take it.
    active_transaction: Mutex<Option<String>>,

    /// Set once by `Connection::close`
    closed: AtomicBool,

    /// Number of statements executed on this session
    statement_count: AtomicU64,
}

impl Session {
    /// Create a new open session with no active transaction.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        // the slot is a plain Option, so a poisoned guard is still consistent
        match self.active_transaction.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Id of the transaction statements should attach, if one is open.
    pub fn active_transaction(&self) -> Option<String> {
        self.slot().clone()
    }

    /// Check if a transaction is currently open.
    pub fn in_transaction(&self) -> bool {
        self.slot().is_some()
    }

    /// Record `id` as the open transaction.
    ///
    /// Returns `false` without changing anything if another transaction is
    /// already recorded.
    pub(crate) fn set_active_transaction(&self, id: String) -> bool {
        let mut slot = self.slot();
        if slot.is_some() {
            return false;
        }
        *slot = Some(id);
        true
    }

    /// Clear the transaction slot if it still holds `id`.
    pub(crate) fn clear_transaction(&self, id: &str) {
        let mut slot = self.slot();
        if slot.as_deref() == Some(id) {
            *slot = None;
        }
    }

    /// Mark the session closed and forget any open transaction.
    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        *self.slot() = None;
    }

    /// Check if the session is closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Fail with `ConnectionClosed` once the session is closed.
    pub fn validate_open(&self) -> Result<(), ConnectionError> {
        if self.is_closed() {
            Err(ConnectionError::ConnectionClosed)
        } else {
            Ok(())
        }
    }

    pub(crate) fn increment_statement_count(&self) -> u64 {
        self.statement_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of statements executed so far.
    pub fn statement_count(&self) -> u64 {
        self.statement_count.load(Ordering::Relaxed)
    }
}
