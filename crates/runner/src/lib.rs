//! FX Simulator Runner - Multi-Pair Market Simulation
//!
//! Orchestrates the full FX market with one maker per pair:
//!
//! - **Config**: JSON configuration with an embedded default market
//! - **Bootstrap**: Books, engine, resolver and agents wired from a config
//! - **Simulation**: The turn-based maker/taker step loop
//!
//! ## Architecture
//!
//! ```text
//!                    ┌───────────────────────┐
//!                    │   SimulationConfig    │
//!                    └───────────┬───────────┘
//!                                │
//!                                ▼
//!                    ┌───────────────────────┐
//!                    │    MarketBootstrap    │
//!                    └───────────┬───────────┘
//!                                │
//! ┌──────────────────────────────┼──────────────────────────────────┐
//! │ FxMarketSimulation::step     ▼                                  │
//! │                                                                 │
//! │  ┌──────────────────┐  mid   ┌─────────────────────────┐        │
//! │  │  Market Makers   │◄───────│  PriceCrossingResolver  │        │
//! │  │  (one per pair)  │        └────────────▲────────────┘        │
//! │  └───┬──────────┬───┘                     │ per-pair quotes     │
//! │      │ quotes   │ update     ┌────────────┴────────────┐        │
//! │      │          └───────────►│    SharedPriceEngine    │        │
//! │      ▼                       └─────────────────────────┘        │
//! │  ┌──────────────────┐        ┌─────────────────────────┐        │
//! │  │   Order Books    │───────►│      Market Takers      │        │
//! │  └──────────────────┘  top   └─────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod simulation;

// Re-export main types
pub use bootstrap::MarketBootstrap;
pub use config::{
    ConfigError, MakerConfig, PricingConfig, SimulationConfig, TakerConfig, load_config,
    load_config_from_str, load_default_config,
};
pub use error::{SimulationError, SimulationResult};
pub use simulation::{FxMarketSimulation, SimulationResults, StepReport};
