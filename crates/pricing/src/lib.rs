//! FX Consensus Pricing
//!
//! The pricing core of the simulator:
//! - **VWAP**: depth-truncated volume-weighted averaging of a price ladder
//! - **Engine**: latest order-book snapshot per pair, aggregated per pair or
//!   pooled across all pairs
//! - **Crossing**: per-pair choice between direct pricing and synthesis via a
//!   pivot currency, with a cross → direct → global fallback chain
//!
//! ## Data flow
//!
//! ```text
//! MarketMaker ── OrderBook ──► SharedPriceEngine::update
//!      ▲                              │
//!      │ mid                          │ calculate_pair_price / calculate_consensus_price
//!      │                              ▼
//!      └──────────────── PriceCrossingResolver
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fxsim_pricing::{ConsensusPriceEngine, PriceCrossingResolver, PriceProduction};
//!
//! let mut engine = ConsensusPriceEngine::new(dec!(3), dec!(3))?;
//! engine.update(&book);
//! let quote = engine.calculate_pair_price(book.currency_pair())?;
//! ```

pub mod crossing;
pub mod engine;
pub mod shared;
pub mod vwap;

// Re-export main types
pub use crossing::{
    DEFAULT_PIVOTS, MidPriceTier, PriceCrossingResolver, PricingStrategy, RandomStrategySelector,
    ResolvedMid, StrategyRecord, StrategySelector,
};
pub use engine::ConsensusPriceEngine;
pub use shared::SharedPriceEngine;
pub use vwap::DepthWindow;

// Re-export the port so callers need a single import
pub use fxsim_ports::{PriceProduction, PriceQuote, PricingError, PricingResult};
