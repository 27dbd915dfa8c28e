// 🔒 Shared Ledger - one ledger per application session
//
// Cloneable handle for front-ends that serve several callers. Mutations run
// under the write lock, so readers see a sale and its contact together or
// not at all. Reads share the read lock.

use crate::config::Config;
use crate::contacts::Contact;
use crate::error::LedgerError;
use crate::ledger::{Sale, SaleInput, SalesLedger};
use crate::report::Report;
use crate::tickets::PriceTable;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<SalesLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: SalesLedger) -> Self {
        SharedLedger {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn from_config(config: Config) -> Result<Self, LedgerError> {
        Ok(SharedLedger::new(SalesLedger::new(config)?))
    }

    // Validation runs before any mutation, so a poisoned lock never guards a torn ledger.
    fn read(&self) -> RwLockReadGuard<'_, SalesLedger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SalesLedger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, input: SaleInput) -> Result<Sale, LedgerError> {
        self.write().record(input)
    }

    pub fn append_contact(&self, name: impl Into<String>, phone: impl Into<String>) -> Contact {
        self.write().contacts_mut().append(name, phone)
    }

    pub fn report(&self) -> Report {
        self.read().report()
    }

    pub fn search_contacts(&self, query: &str) -> Vec<Contact> {
        self.read().contacts().search(query)
    }

    pub fn sales(&self) -> Vec<Sale> {
        self.read().sales().to_vec()
    }

    pub fn sellers(&self) -> Vec<String> {
        self.read().sellers().to_vec()
    }

    pub fn prices(&self) -> PriceTable {
        self.read().prices().clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================
