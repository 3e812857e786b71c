//! Bootstrap - Market setup before the first step
//!
//! Handles initial setup of the simulation:
//! - One empty order book per configured pair
//! - The shared consensus engine and the crossing resolver
//! - One market maker per pair, each with its own risk factor
//! - Reference quotes so the first step does not start from a zero consensus
//!
//! Every generator is derived from one master generator, so a fixed seed
//! reproduces the whole market.

use crate::config::SimulationConfig;
use crate::error::SimulationResult;
use fxsim_core::{OrderBook, OrderBooks};
use fxsim_pricing::{
    ConsensusPriceEngine, PriceCrossingResolver, RandomStrategySelector, SharedPriceEngine,
};
use fxsim_strategy::sampling::{rng_from_seed, uniform_decimal};
use fxsim_strategy::{MarketMaker, MarketMakerConfig};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Everything a simulation needs, wired together
pub struct MarketBootstrap {
    /// One book per pair, in configuration order
    pub order_books: OrderBooks,
    /// Engine shared by makers and resolver
    pub engine: SharedPriceEngine,
    pub resolver: Arc<PriceCrossingResolver<SharedPriceEngine>>,
    /// One maker per pair, in configuration order
    pub makers: Vec<MarketMaker>,
    /// Generator for taker side and size draws
    pub taker_rng: StdRng,
}

impl MarketBootstrap {
    /// Validate `config` and build the market
    pub fn from_config(config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let mut master = rng_from_seed(config.seed);

        let engine = SharedPriceEngine::new(ConsensusPriceEngine::new(
            config.pricing.mid_depth,
            config.pricing.spread_depth,
        )?);

        let mut selector =
            RandomStrategySelector::with_seed(config.pricing.cross_probability, master.r#gen());
        let resolver = Arc::new(PriceCrossingResolver::initialize(
            config.pairs.clone(),
            engine.clone(),
            &config.pricing.pivot_candidates,
            &mut selector,
        ));
        for (pair, record) in resolver.strategies() {
            info!("{}: {}", pair, record.effective);
        }
        let degraded = resolver.degraded_pairs().count();
        if degraded > 0 {
            warn!("{} cross strategies degraded to direct", degraded);
        }

        let mut order_books: OrderBooks = config
            .pairs
            .iter()
            .map(|pair| (pair.clone(), OrderBook::new(pair.clone(), config.book_capacity)))
            .collect();

        let makers = config
            .pairs
            .iter()
            .map(|pair| {
                let risk_factor = uniform_decimal(
                    &mut master,
                    config.maker.risk_factor_min,
                    config.maker.risk_factor_max,
                );
                let maker_config = MarketMakerConfig {
                    pairs: vec![pair.clone()],
                    risk_factor,
                    min_skew: config.maker.min_skew,
                    max_skew: config.maker.max_skew,
                    quote_size: config.maker.quote_size,
                    seed: Some(master.r#gen()),
                };
                MarketMaker::new(format!("mm-{}", pair), maker_config, resolver.clone())
            })
            .collect();

        seed_reference_quotes(config, &mut order_books, &engine)?;

        Ok(Self {
            order_books,
            engine,
            resolver,
            makers,
            taker_rng: StdRng::seed_from_u64(master.r#gen()),
        })
    }
}

/// Quote `rate ∓ max_skew` on each listed pair and push it into the engine
fn seed_reference_quotes(
    config: &SimulationConfig,
    order_books: &mut OrderBooks,
    engine: &SharedPriceEngine,
) -> SimulationResult<()> {
    let half_spread = config.maker.reference_half_spread();
    let size = config.maker.quote_size;

    for (pair, rate) in &config.reference_rates {
        let Some(book) = order_books.get_mut(pair) else {
            continue;
        };
        book.update_bid(&[*rate - half_spread], &[size])?;
        book.update_ask(&[*rate + half_spread], &[size])?;
        engine.update(book);
    }

    if !config.reference_rates.is_empty() {
        info!("Seeded {} books from reference rates", config.reference_rates.len());
    }
    Ok(())
}
