//! Shared engine handle
//!
//! Makers, the crossing resolver and the simulation driver all talk to one
//! engine. The handle serializes `update` (exclusive write lock) against the
//! price queries (shared read lock), so a query never observes a partially
//! written snapshot.

use crate::engine::ConsensusPriceEngine;
use fxsim_core::{CurrencyPair, OrderBook};
use fxsim_ports::{PriceProduction, PriceQuote, PricingResult};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Cloneable, thread-safe handle to a [`ConsensusPriceEngine`]
#[derive(Debug, Clone)]
pub struct SharedPriceEngine {
    inner: Arc<RwLock<ConsensusPriceEngine>>,
}

impl SharedPriceEngine {
    pub fn new(engine: ConsensusPriceEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Replace the stored snapshot for the book's pair
    pub fn update(&self, order_book: &OrderBook) {
        self.inner.write().update(order_book);
    }

    /// Hold the read lock across several queries
    pub fn read(&self) -> RwLockReadGuard<'_, ConsensusPriceEngine> {
        self.inner.read()
    }

    /// Copy of the latest snapshot for a pair
    pub fn snapshot(&self, pair: &CurrencyPair) -> Option<OrderBook> {
        self.inner.read().snapshot(pair).cloned()
    }

    pub fn tracked_pairs(&self) -> Vec<CurrencyPair> {
        self.inner.read().tracked_pairs().cloned().collect()
    }
}

impl From<ConsensusPriceEngine> for SharedPriceEngine {
    fn from(engine: ConsensusPriceEngine) -> Self {
        Self::new(engine)
    }
}

impl PriceProduction for SharedPriceEngine {
    fn calculate_consensus_price(&self) -> PriceQuote {
        self.inner.read().calculate_consensus_price()
    }

    fn calculate_pair_price(&self, pair: &CurrencyPair) -> PricingResult<PriceQuote> {
        self.inner.read().calculate_pair_price(pair)
    }
}
