use rust_decimal::Decimal;
use thiserror::Error;

use crate::instruments::CurrencyPair;

/// Errors raised while constructing or parsing a currency pair
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error("Malformed currency pair {0:?}, expected BASE/QUOTE")]
    Malformed(String),

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    #[error("Base and quote are the same currency: {0}")]
    SameCurrency(String),
}

/// Errors raised when replacing one side of an order book
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("{pair}: got {prices} prices but {sizes} sizes")]
    LengthMismatch {
        pair: CurrencyPair,
        prices: usize,
        sizes: usize,
    },

    #[error("{pair}: {levels} levels exceed book capacity of {capacity}")]
    CapacityExceeded {
        pair: CurrencyPair,
        levels: usize,
        capacity: usize,
    },

    #[error("{pair}: negative level size {size}")]
    NegativeSize { pair: CurrencyPair, size: Decimal },
}
