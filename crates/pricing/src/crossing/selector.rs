use super::strategy::PricingStrategy;
use fxsim_core::{CurrencyCode, CurrencyPair};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Chooses the requested strategy for a target pair
///
/// The choice is only a request: the resolver still validates that both
/// cross legs exist.
pub trait StrategySelector {
    /// `pivots` already excludes the pair's own currencies
    fn select(&mut self, pair: &CurrencyPair, pivots: &[CurrencyCode]) -> PricingStrategy;
}

impl<F> StrategySelector for F
where
    F: FnMut(&CurrencyPair, &[CurrencyCode]) -> PricingStrategy,
{
    fn select(&mut self, pair: &CurrencyPair, pivots: &[CurrencyCode]) -> PricingStrategy {
        self(pair, pivots)
    }
}

/// Picks cross with a fixed probability, with a uniformly random pivot
pub struct RandomStrategySelector<R = StdRng> {
    rng: R,
    cross_probability: f64,
}

impl RandomStrategySelector<StdRng> {
    /// Create with a specific seed for reproducible simulations
    pub fn with_seed(cross_probability: f64, seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), cross_probability)
    }
}

impl<R: Rng> RandomStrategySelector<R> {
    /// `cross_probability` is clamped to [0, 1]; NaN counts as 0
    pub fn new(rng: R, cross_probability: f64) -> Self {
        let cross_probability = if cross_probability.is_nan() {
            0.0
        } else {
            cross_probability.clamp(0.0, 1.0)
        };
        Self {
            rng,
            cross_probability,
        }
    }

    pub fn cross_probability(&self) -> f64 {
        self.cross_probability
    }
}

impl<R: Rng> StrategySelector for RandomStrategySelector<R> {
    fn select(&mut self, _pair: &CurrencyPair, pivots: &[CurrencyCode]) -> PricingStrategy {
        if !self.rng.gen_bool(self.cross_probability) {
            return PricingStrategy::Direct;
        }
        match pivots.choose(&mut self.rng) {
            Some(pivot) => PricingStrategy::cross(pivot.clone()),
            None => PricingStrategy::Direct,
        }
    }
}
