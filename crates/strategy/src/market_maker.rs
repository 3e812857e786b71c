//! Consensus-Anchored Market Maker
//!
//! A simple market making strategy that:
//! - Asks the crossing resolver for each pair's mid price
//! - Quotes a symmetric bid/ask around it, skewed by a random amount scaled
//!   by the maker's risk factor
//! - Replaces the pair's book with a single level per side
//! - Pushes the new book into the consensus engine
//!
//! The push is the only way the engine's per-pair snapshots advance, so the
//! next maker to ask for a price already sees this maker's quote.

use crate::sampling::{rng_from_seed, uniform_decimal};
use fxsim_core::{BookError, CurrencyPair, OrderBooks, Price, Quantity};
use fxsim_pricing::{MidPriceTier, PriceCrossingResolver, SharedPriceEngine};
use log::{debug, warn};
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Configuration for the market maker
#[derive(Debug, Clone)]
pub struct MarketMakerConfig {
    /// Pairs this maker quotes
    pub pairs: Vec<CurrencyPair>,
    /// Multiplier on the sampled skew
    pub risk_factor: Decimal,
    /// Lower bound of the raw skew, in price units
    pub min_skew: f64,
    /// Upper bound of the raw skew, in price units
    pub max_skew: f64,
    /// Size of each quoted level
    pub quote_size: Quantity,
    /// Random seed (for reproducibility)
    pub seed: Option<u64>,
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            pairs: vec![CurrencyPair::new("EUR", "USD")],
            risk_factor: dec!(1),
            min_skew: 0.0001,
            max_skew: 0.001,
            quote_size: dec!(10), // 10M
            seed: None,
        }
    }
}

/// One quote written by the maker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakerQuote {
    pub pair: CurrencyPair,
    /// Mid the quote was centred on
    pub mid: Price,
    /// Fallback tier that produced the mid
    pub tier: MidPriceTier,
    pub bid: Price,
    pub ask: Price,
    pub size: Quantity,
}

impl MakerQuote {
    pub fn spread(&self) -> Price {
        self.ask - self.bid
    }
}

/// Market maker quoting around the resolver's mid
pub struct MarketMaker {
    name: String,
    config: MarketMakerConfig,
    /// Price source; its producer is the engine quotes are pushed into
    resolver: Arc<PriceCrossingResolver<SharedPriceEngine>>,
    rng: StdRng,
}

impl MarketMaker {
    pub fn new(
        name: impl Into<String>,
        config: MarketMakerConfig,
        resolver: Arc<PriceCrossingResolver<SharedPriceEngine>>,
    ) -> Self {
        let rng = rng_from_seed(config.seed);
        Self {
            name: name.into(),
            config,
            resolver,
            rng,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &MarketMakerConfig {
        &self.config
    }

    pub fn pairs(&self) -> &[CurrencyPair] {
        &self.config.pairs
    }

    /// Skew for the next quote: uniform(min_skew, max_skew) × risk_factor
    pub fn sample_skew(&mut self) -> Price {
        uniform_decimal(&mut self.rng, self.config.min_skew, self.config.max_skew)
            * self.config.risk_factor
    }

    /// Bid and ask placed `skew` either side of `mid`
    pub fn calculate_quotes(mid: Price, skew: Price) -> (Price, Price) {
        (mid - skew, mid + skew)
    }

    /// Requote every pair and push the new books into the engine
    ///
    /// Pairs with no book in `order_books` are skipped.
    pub fn place_orders(
        &mut self,
        order_books: &mut OrderBooks,
    ) -> Result<Vec<MakerQuote>, BookError> {
        let pairs = self.config.pairs.clone();
        let mut quotes = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let Some(book) = order_books.get_mut(&pair) else {
                warn!("[{}] No order book for {}, skipping", self.name, pair);
                continue;
            };

            let resolved = self.resolver.resolve_mid_price(&pair);
            let skew = self.sample_skew();
            let (bid, ask) = Self::calculate_quotes(resolved.price, skew);
            let size = self.config.quote_size;

            book.update_bid(&[bid], &[size])?;
            book.update_ask(&[ask], &[size])?;
            self.resolver.prices().update(book);

            debug!(
                "[{}] {} quoting bid={:.5} ask={:.5} size={} mid={:.5} ({})",
                self.name, pair, bid, ask, size, resolved.price, resolved.tier
            );

            quotes.push(MakerQuote {
                pair,
                mid: resolved.price,
                tier: resolved.tier,
                bid,
                ask,
                size,
            });
        }

        Ok(quotes)
    }
}
