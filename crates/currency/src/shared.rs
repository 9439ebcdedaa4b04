//! Ledgers shared between threads.

use std::sync::{Arc, Mutex, MutexGuard};

use coffer_core::{DomainError, DomainResult, LedgerId};

use crate::ledger::Ledger;

/// Cloneable handle to a ledger behind a mutex.
///
/// Clones point at the same ledger. Multi-ledger operations (trades) must
/// additionally be serialised by the caller; see `coffer_trade::Economy`.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    id: LedgerId,
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            id: ledger.id(),
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Id of the wrapped ledger (no locking needed).
    pub fn id(&self) -> LedgerId {
        self.id
    }

    pub fn lock(&self) -> DomainResult<MutexGuard<'_, Ledger>> {
        self.inner
            .lock()
            .map_err(|_| DomainError::conflict(format!("ledger {} lock poisoned", self.id)))
    }

    pub fn balance(&self) -> DomainResult<i64> {
        Ok(self.lock()?.balance())
    }

    /// `true` when both handles refer to the same ledger.
    pub fn ptr_eq(&self, other: &SharedLedger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
