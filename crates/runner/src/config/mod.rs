//! Simulation configuration
//!
//! JSON-backed, with an embedded default that reproduces the eleven-pair
//! G3/Scandinavian market.

mod loader;
mod types;

pub use loader::{ConfigError, load_config, load_config_from_str, load_default_config};
pub use types::{MakerConfig, PricingConfig, SimulationConfig, TakerConfig};
