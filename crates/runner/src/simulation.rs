//! Simulation - Turn-based FX market
//!
//! Each step is one full pass of every market maker followed by one taker per
//! order book:
//! - Makers requote in configuration order; each maker's book reaches the
//!   engine before the next maker asks for a price
//! - The global consensus is reported after every maker update
//! - Takers draw a random side and size and execute at the top of the book

use crate::bootstrap::MarketBootstrap;
use crate::config::SimulationConfig;
use crate::error::SimulationResult;
use fxsim_core::{CurrencyPair, OrderBooks};
use fxsim_pricing::{
    PriceCrossingResolver, PriceProduction, PriceQuote, SharedPriceEngine, StrategyRecord,
};
use fxsim_strategy::{Execution, MakerQuote, MarketMaker, MarketTaker};
use log::{info, warn};
use rand::rngs::StdRng;
use std::sync::Arc;

/// What happened during one step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: usize,
    /// One quote per maker pair, in the order they were written
    pub quotes: Vec<MakerQuote>,
    /// Global consensus right after each quote in `quotes`
    pub consensus_trail: Vec<PriceQuote>,
    /// Executions of this step's takers; books without a contra side are absent
    pub executions: Vec<Execution>,
}

impl StepReport {
    /// Global consensus once every maker has quoted
    pub fn consensus(&self) -> PriceQuote {
        self.consensus_trail.last().copied().unwrap_or_default()
    }
}

/// Simulation results
#[derive(Debug, Clone, Default)]
pub struct SimulationResults {
    /// Steps run
    pub steps: usize,
    pub reports: Vec<StepReport>,
    /// Global consensus after the last step
    pub final_consensus: PriceQuote,
    pub total_quotes: usize,
    pub total_executions: usize,
    /// Requested and effective strategy per pair
    pub strategies: Vec<(CurrencyPair, StrategyRecord)>,
}

impl SimulationResults {
    pub fn degraded_pairs(&self) -> impl Iterator<Item = &CurrencyPair> {
        self.strategies
            .iter()
            .filter(|(_, record)| record.is_degraded())
            .map(|(pair, _)| pair)
    }
}

/// Multi-pair FX market simulation
pub struct FxMarketSimulation {
    config: SimulationConfig,
    order_books: OrderBooks,
    engine: SharedPriceEngine,
    resolver: Arc<PriceCrossingResolver<SharedPriceEngine>>,
    makers: Vec<MarketMaker>,
    taker_rng: StdRng,
    /// Next step index
    step: usize,
}

impl FxMarketSimulation {
    /// Create a simulation with the default configuration
    pub fn new() -> SimulationResult<Self> {
        Self::with_config(SimulationConfig::default())
    }

    /// Create a simulation with custom configuration
    pub fn with_config(config: SimulationConfig) -> SimulationResult<Self> {
        let market = MarketBootstrap::from_config(&config)?;
        Ok(Self::from_bootstrap(config, market))
    }

    /// Run a market that was already bootstrapped
    pub fn from_bootstrap(config: SimulationConfig, market: MarketBootstrap) -> Self {
        Self {
            config,
            order_books: market.order_books,
            engine: market.engine,
            resolver: market.resolver,
            makers: market.makers,
            taker_rng: market.taker_rng,
            step: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn order_books(&self) -> &OrderBooks {
        &self.order_books
    }

    pub fn engine(&self) -> &SharedPriceEngine {
        &self.engine
    }

    pub fn resolver(&self) -> &PriceCrossingResolver<SharedPriceEngine> {
        &self.resolver
    }

    /// Number of steps run so far
    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Run one maker pass and one taker pass
    pub fn step(&mut self) -> SimulationResult<StepReport> {
        let step = self.step;
        info!("--- Step {} ---", step);

        let mut quotes = Vec::with_capacity(self.makers.len());
        let mut consensus_trail = Vec::with_capacity(self.makers.len());
        for maker in &mut self.makers {
            for quote in maker.place_orders(&mut self.order_books)? {
                let consensus = self.engine.calculate_consensus_price();
                info!(
                    "{}: Consensus Mid = {:.4}, Consensus Spread = {:.4}",
                    quote.pair, consensus.mid, consensus.spread
                );
                quotes.push(quote);
                consensus_trail.push(consensus);
            }
        }

        let mut executions = Vec::with_capacity(self.order_books.len());
        for (pair, book) in &self.order_books {
            let taker = MarketTaker::random(
                &mut self.taker_rng,
                self.config.taker.min_size,
                self.config.taker.max_size,
            );
            match taker.place_order(book) {
                Some(execution) => {
                    info!("MarketTaker {}", execution);
                    executions.push(execution);
                }
                None => warn!(
                    "MarketTaker {} on {}: no {} liquidity",
                    taker.side(),
                    pair,
                    taker.side().contra_side()
                ),
            }
        }

        self.step += 1;
        Ok(StepReport {
            step,
            quotes,
            consensus_trail,
            executions,
        })
    }

    /// Run `steps` steps and collect the results
    pub fn run(&mut self, steps: usize) -> SimulationResult<SimulationResults> {
        info!(
            "Running {} steps over {} pairs (mid depth {}, spread depth {})",
            steps,
            self.order_books.len(),
            self.config.pricing.mid_depth,
            self.config.pricing.spread_depth
        );

        let mut results = SimulationResults {
            steps,
            strategies: self
                .resolver
                .strategies()
                .map(|(pair, record)| (pair.clone(), record.clone()))
                .collect(),
            ..Default::default()
        };

        for _ in 0..steps {
            let report = self.step()?;
            results.total_quotes += report.quotes.len();
            results.total_executions += report.executions.len();
            results.reports.push(report);
        }
        results.final_consensus = self.engine.calculate_consensus_price();

        info!(
            "Done: {} quotes, {} executions, final consensus mid {:.4} spread {:.4}",
            results.total_quotes,
            results.total_executions,
            results.final_consensus.mid,
            results.final_consensus.spread
        );
        Ok(results)
    }

    /// Run the configured number of steps
    pub fn run_configured(&mut self) -> SimulationResult<SimulationResults> {
        self.run(self.config.steps)
    }
}
