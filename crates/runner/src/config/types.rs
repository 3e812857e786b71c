use fxsim_core::{CurrencyCode, CurrencyPair, Price, Quantity};
use fxsim_pricing::DEFAULT_PIVOTS;
use fxsim_strategy::sampling::SAMPLE_DP;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Full simulation configuration
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Traded pairs, one book and one maker each
    pub pairs: Vec<CurrencyPair>,
    /// Steps run by `FxMarketSimulation::run_configured`
    pub steps: usize,
    /// Levels per book side
    pub book_capacity: usize,
    pub pricing: PricingConfig,
    pub maker: MakerConfig,
    pub taker: TakerConfig,
    /// Rates used to seed books before the first step
    pub reference_rates: IndexMap<CurrencyPair, Price>,
    /// Master seed; every agent's generator is derived from it
    pub seed: Option<u64>,
}

/// Consensus engine and crossing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Size budget for the mid price
    pub mid_depth: Quantity,
    /// Size budget for the spread
    pub spread_depth: Quantity,
    /// Chance that a pair asks for a cross strategy
    pub cross_probability: f64,
    /// Pivots offered to the strategy selector
    pub pivot_candidates: Vec<CurrencyCode>,
}

/// Market maker population settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakerConfig {
    pub quote_size: Quantity,
    pub min_skew: f64,
    pub max_skew: f64,
    /// Each maker draws its risk factor from [min, max)
    pub risk_factor_min: f64,
    pub risk_factor_max: f64,
}

/// Market taker population settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakerConfig {
    pub min_size: f64,
    pub max_size: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let pairs = [
            ("EUR", "USD", dec!(1.09)),
            ("GBP", "USD", dec!(1.27)),
            ("EUR", "SEK", dec!(11.20)),
            ("EUR", "NOK", dec!(11.50)),
            ("EUR", "DKK", dec!(7.46)),
            ("USD", "SEK", dec!(10.30)),
            ("USD", "NOK", dec!(10.55)),
            ("USD", "DKK", dec!(6.85)),
            ("GBP", "SEK", dec!(13.10)),
            ("GBP", "NOK", dec!(13.40)),
            ("GBP", "DKK", dec!(8.70)),
        ];

        Self {
            pairs: pairs
                .iter()
                .map(|(base, quote, _)| CurrencyPair::new(*base, *quote))
                .collect(),
            steps: 5,
            book_capacity: 10,
            pricing: PricingConfig::default(),
            maker: MakerConfig::default(),
            taker: TakerConfig::default(),
            reference_rates: pairs
                .iter()
                .map(|(base, quote, rate)| (CurrencyPair::new(*base, *quote), *rate))
                .collect(),
            seed: None,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            mid_depth: dec!(3),
            spread_depth: dec!(3),
            cross_probability: 0.5,
            pivot_candidates: DEFAULT_PIVOTS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            quote_size: dec!(10), // 10M
            min_skew: 0.0001,
            max_skew: 0.001,
            risk_factor_min: 0.5,
            risk_factor_max: 1.5,
        }
    }
}

impl Default for TakerConfig {
    fn default() -> Self {
        Self {
            min_size: 1.0,
            max_size: 5.0,
        }
    }
}

impl MakerConfig {
    /// Half-width of the reference quotes written before the first step
    pub fn reference_half_spread(&self) -> Price {
        Decimal::try_from(self.max_skew)
            .map(|d| d.round_dp(SAMPLE_DP))
            .unwrap_or(Decimal::ZERO)
    }
}
