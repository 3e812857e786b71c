use fxsim_core::{CurrencyCode, CurrencyPair, Price};
use std::fmt;

/// How a target pair's mid price is produced
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PricingStrategy {
    /// From the pair's own book
    #[default]
    Direct,
    /// From base/pivot × pivot/quote
    Cross { pivot: CurrencyCode },
}

impl PricingStrategy {
    pub fn cross(pivot: impl Into<CurrencyCode>) -> Self {
        PricingStrategy::Cross {
            pivot: pivot.into(),
        }
    }

    pub fn pivot(&self) -> Option<&str> {
        match self {
            PricingStrategy::Direct => None,
            PricingStrategy::Cross { pivot } => Some(pivot),
        }
    }

    pub fn is_cross(&self) -> bool {
        matches!(self, PricingStrategy::Cross { .. })
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingStrategy::Direct => write!(f, "direct"),
            PricingStrategy::Cross { pivot } => write!(f, "cross via {}", pivot),
        }
    }
}

/// Requested and effective strategy for one target pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyRecord {
    /// What the selector (or caller) asked for
    pub requested: PricingStrategy,
    /// What the resolver actually uses after leg validation
    pub effective: PricingStrategy,
}

impl StrategyRecord {
    /// A cross request that fell back to direct
    pub fn is_degraded(&self) -> bool {
        self.requested != self.effective
    }
}

/// Which step of the cross → direct → global chain produced a mid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MidPriceTier {
    Cross,
    Direct,
    Consensus,
}

impl fmt::Display for MidPriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidPriceTier::Cross => write!(f, "cross"),
            MidPriceTier::Direct => write!(f, "direct"),
            MidPriceTier::Consensus => write!(f, "consensus"),
        }
    }
}

/// A resolved mid price and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMid {
    pub price: Price,
    pub tier: MidPriceTier,
}

/// The two legs that cross `pair` through `pivot`: (base/pivot, pivot/quote)
pub fn cross_legs(pair: &CurrencyPair, pivot: &str) -> (CurrencyPair, CurrencyPair) {
    (
        CurrencyPair::new(pair.base(), pivot),
        CurrencyPair::new(pivot, pair.quote()),
    )
}
