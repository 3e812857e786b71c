//! Per-pair order book
//!
//! A fixed-capacity ladder of (price, size) levels on each side. Each side is
//! replaced wholesale on update and is stored in the order it was written:
//! the book never sorts. Consumers that need price priority (the consensus
//! engine) sort at read time.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::side::BookSide;
use crate::error::BookError;
use crate::instruments::CurrencyPair;
use crate::values::{Price, Quantity};

/// A single price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Price,
    pub size: Quantity,
}

impl BookLevel {
    pub fn new(price: Price, size: Quantity) -> Self {
        Self { price, size }
    }
}

/// One book per pair, in the order the pairs were configured
pub type OrderBooks = IndexMap<CurrencyPair, OrderBook>;

/// Order book for a single currency pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    currency_pair: CurrencyPair,
    /// Maximum number of levels per side
    capacity: usize,
    bids: Vec<BookLevel>,
    asks: Vec<BookLevel>,
}

impl OrderBook {
    /// Create an empty book holding at most `capacity` levels per side
    pub fn new(currency_pair: CurrencyPair, capacity: usize) -> Self {
        Self {
            currency_pair,
            capacity,
            bids: Vec::with_capacity(capacity),
            asks: Vec::with_capacity(capacity),
        }
    }

    pub fn currency_pair(&self) -> &CurrencyPair {
        &self.currency_pair
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // === Updates ===

    /// Replace the whole bid ladder
    ///
    /// On error the existing ladder is left untouched.
    pub fn update_bid(&mut self, prices: &[Price], sizes: &[Quantity]) -> Result<(), BookError> {
        self.bids = self.build_levels(prices, sizes)?;
        Ok(())
    }

    /// Replace the whole ask ladder
    ///
    /// On error the existing ladder is left untouched.
    pub fn update_ask(&mut self, prices: &[Price], sizes: &[Quantity]) -> Result<(), BookError> {
        self.asks = self.build_levels(prices, sizes)?;
        Ok(())
    }

    fn build_levels(
        &self,
        prices: &[Price],
        sizes: &[Quantity],
    ) -> Result<Vec<BookLevel>, BookError> {
        if prices.len() != sizes.len() {
            return Err(BookError::LengthMismatch {
                pair: self.currency_pair.clone(),
                prices: prices.len(),
                sizes: sizes.len(),
            });
        }
        if prices.len() > self.capacity {
            return Err(BookError::CapacityExceeded {
                pair: self.currency_pair.clone(),
                levels: prices.len(),
                capacity: self.capacity,
            });
        }
        if let Some(size) = sizes.iter().find(|s| **s < Decimal::ZERO) {
            return Err(BookError::NegativeSize {
                pair: self.currency_pair.clone(),
                size: *size,
            });
        }

        Ok(prices
            .iter()
            .zip(sizes)
            .map(|(price, size)| BookLevel::new(*price, *size))
            .collect())
    }

    // === Level Queries ===

    /// Levels of one side, in the order they were written
    pub fn levels(&self, side: BookSide) -> &[BookLevel] {
        match side {
            BookSide::Bid => &self.bids,
            BookSide::Ask => &self.asks,
        }
    }

    pub fn bids(&self) -> &[BookLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[BookLevel] {
        &self.asks
    }

    /// First level of a side as written (no price sorting)
    pub fn best(&self, side: BookSide) -> Option<BookLevel> {
        self.levels(side).first().copied()
    }
}
