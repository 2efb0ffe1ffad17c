//! Thread-shareable ledger handle.
//!
//! The ledger itself assumes a single mutator. Hosts that hand it to several
//! threads go through this wrapper, which serializes writers behind an
//! `RwLock` and hands out owned snapshots to readers.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use quantumstock_core::{Clock, DomainError, DomainResult, SystemClock};
use quantumstock_products::{NewProduct, Product, ProductId, ProductPatch};

use crate::ledger::{Deletion, Ledger};
use crate::movement::{NewMovement, StockMovement};
use crate::stats::{DashboardStats, TopMover};

pub struct SharedLedger<C: Clock = SystemClock> {
    inner: Arc<RwLock<Ledger<C>>>,
}

impl<C: Clock> Clone for SharedLedger<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> From<Ledger<C>> for SharedLedger<C> {
    fn from(ledger: Ledger<C>) -> Self {
        Self::new(ledger)
    }
}

fn poisoned() -> DomainError {
    DomainError::conflict("ledger lock poisoned")
}

impl<C: Clock> SharedLedger<C> {
    pub fn new(ledger: Ledger<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Ledger<C>>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Ledger<C>>> {
        self.inner.write().map_err(|_| poisoned())
    }

    /// Run a read-only closure against a consistent snapshot.
    pub fn with_read<R>(&self, f: impl FnOnce(&Ledger<C>) -> R) -> DomainResult<R> {
        Ok(f(&*self.read()?))
    }

    /// Run a closure with exclusive access, e.g. to draft and record a
    /// movement without another writer slipping in between.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut Ledger<C>) -> R) -> DomainResult<R> {
        Ok(f(&mut *self.write()?))
    }

    pub fn add_product(&self, input: NewProduct) -> DomainResult<Product> {
        self.write()?.add_product(input)
    }

    pub fn update_product(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Option<Product>> {
        self.write()?.update_product(id, patch)
    }

    pub fn delete_product(&self, id: ProductId) -> DomainResult<Deletion> {
        Ok(self.write()?.delete_product(id))
    }

    pub fn add_movement(&self, input: NewMovement) -> DomainResult<StockMovement> {
        self.write()?.add_movement(input)
    }

    pub fn product(&self, id: ProductId) -> DomainResult<Option<Product>> {
        self.with_read(|l| l.product(id).cloned())
    }

    pub fn low_stock_products(&self) -> DomainResult<Vec<Product>> {
        self.with_read(|l| l.low_stock_products().into_iter().cloned().collect())
    }

    pub fn top_movers(&self, limit: usize) -> DomainResult<Vec<TopMover>> {
        self.with_read(|l| l.top_movers(limit))
    }

    pub fn dashboard_stats(&self) -> DomainResult<DashboardStats> {
        self.with_read(|l| l.dashboard_stats())
    }
}
