//! Market Taker
//!
//! Takes liquidity at the top of a book: a BUY lifts the first ask level, a
//! SELL hits the first bid level. The book is read as written (no sorting)
//! and is never modified.

use crate::sampling::uniform_decimal;
use fxsim_core::{CurrencyPair, OrderBook, Price, Quantity, Side};
use rand::Rng;
use std::fmt;

/// A reported execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub pair: CurrencyPair,
    pub side: Side,
    pub price: Price,
    pub size: Quantity,
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {}: Executed {:.2} at {:.4}",
            self.side, self.pair, self.size, self.price
        )
    }
}

/// A one-shot aggressive order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketTaker {
    side: Side,
    size: Quantity,
}

impl MarketTaker {
    pub fn new(side: Side, size: Quantity) -> Self {
        Self { side, size }
    }

    /// Random side, size uniform in [min_size, max_size)
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min_size: f64, max_size: f64) -> Self {
        let side = if rng.r#gen::<bool>() { Side::Buy } else { Side::Sell };
        Self::new(side, uniform_decimal(rng, min_size, max_size))
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn size(&self) -> Quantity {
        self.size
    }

    /// Execute against the contra side's first level
    ///
    /// `None` when that side has no levels.
    pub fn place_order(&self, order_book: &OrderBook) -> Option<Execution> {
        let level = order_book.best(self.side.contra_side())?;
        Some(Execution {
            pair: order_book.currency_pair().clone(),
            side: self.side,
            price: level.price,
            size: self.size,
        })
    }
}
