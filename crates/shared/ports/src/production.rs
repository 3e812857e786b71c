use fxsim_core::{CurrencyPair, Price};
use std::sync::Arc;

use crate::error::PricingResult;

/// A consensus valuation: mid price and spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceQuote {
    pub mid: Price,
    pub spread: Price,
}

impl PriceQuote {
    pub fn new(mid: Price, spread: Price) -> Self {
        Self { mid, spread }
    }
}

/// Port for consensus price production
///
/// Exactly two queries: aggregate every tracked book, or aggregate one pair's
/// book. How books get into the producer is up to the implementation.
pub trait PriceProduction {
    /// Pooled valuation across all tracked books
    ///
    /// Never fails: with no liquidity at all the quote is zero.
    fn calculate_consensus_price(&self) -> PriceQuote;

    /// Valuation of a single pair from its own book
    ///
    /// Fails when the pair is untracked or one side has no size.
    fn calculate_pair_price(&self, pair: &CurrencyPair) -> PricingResult<PriceQuote>;
}

impl<T: PriceProduction + ?Sized> PriceProduction for &T {
    fn calculate_consensus_price(&self) -> PriceQuote {
        (**self).calculate_consensus_price()
    }

    fn calculate_pair_price(&self, pair: &CurrencyPair) -> PricingResult<PriceQuote> {
        (**self).calculate_pair_price(pair)
    }
}

impl<T: PriceProduction + ?Sized> PriceProduction for Arc<T> {
    fn calculate_consensus_price(&self) -> PriceQuote {
        (**self).calculate_consensus_price()
    }

    fn calculate_pair_price(&self, pair: &CurrencyPair) -> PricingResult<PriceQuote> {
        (**self).calculate_pair_price(pair)
    }
}
