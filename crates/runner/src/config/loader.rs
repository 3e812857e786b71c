use fxsim_core::CurrencyPair;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::SimulationConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("No currency pairs in config")]
    EmptyPairs,
    #[error("Duplicate currency pair: {0}")]
    DuplicatePair(CurrencyPair),
    #[error("Reference rate for untraded pair: {0}")]
    UnknownReferencePair(CurrencyPair),
    #[error("Reference rate for {pair} must be positive, got {rate}")]
    InvalidReferenceRate { pair: CurrencyPair, rate: Decimal },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: Decimal },
    #[error("Book capacity must be at least one level")]
    ZeroCapacity,
    #[error("Invalid range for {name}: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("Cross probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}

/// Load simulation configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<SimulationConfig, ConfigError> {
    let config: SimulationConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<SimulationConfig, ConfigError> {
    let default_config = include_str!("simulation_config.json");
    load_config_from_str(default_config)
}

impl SimulationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pairs.is_empty() {
            return Err(ConfigError::EmptyPairs);
        }
        let mut seen = HashSet::with_capacity(self.pairs.len());
        for pair in &self.pairs {
            if !seen.insert(pair) {
                return Err(ConfigError::DuplicatePair(pair.clone()));
            }
        }
        for (pair, rate) in &self.reference_rates {
            if !seen.contains(pair) {
                return Err(ConfigError::UnknownReferencePair(pair.clone()));
            }
            if *rate <= Decimal::ZERO {
                return Err(ConfigError::InvalidReferenceRate {
                    pair: pair.clone(),
                    rate: *rate,
                });
            }
        }

        if self.book_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        positive("mid_depth", self.pricing.mid_depth)?;
        positive("spread_depth", self.pricing.spread_depth)?;
        positive("quote_size", self.maker.quote_size)?;

        let p = self.pricing.cross_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }

        range("skew", self.maker.min_skew, self.maker.max_skew)?;
        range(
            "risk_factor",
            self.maker.risk_factor_min,
            self.maker.risk_factor_max,
        )?;
        range("taker size", self.taker.min_size, self.taker.max_size)?;

        Ok(())
    }
}

fn positive(name: &'static str, value: Decimal) -> Result<(), ConfigError> {
    if value <= Decimal::ZERO {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

/// Finite, non-negative and ordered
fn range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(ConfigError::InvalidRange { name, min, max });
    }
    Ok(())
}
