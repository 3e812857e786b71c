//! FX Market Agents
//!
//! The agents that drive the simulated market:
//! - Market makers that quote around the consensus mid and feed the engine
//! - Market takers that execute at the top of a book
//!
//! ## Architecture
//!
//! ```text
//!                        ┌───────────────────────┐
//!                        │ PriceCrossingResolver │
//!                        └───────────┬───────────┘
//!                                    │ mid
//!                                    ▼
//!                             ┌─────────────┐
//!                             │ MarketMaker │
//!                             └──────┬──────┘
//!                  update_bid/ask    │    SharedPriceEngine::update
//!                 ┌──────────────────┴──────────────────┐
//!                 ▼                                     ▼
//!           OrderBook ──── best bid/ask ───► MarketTaker ──► Execution
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fxsim_strategy::{MarketMaker, MarketMakerConfig};
//!
//! let config = MarketMakerConfig {
//!     pairs: vec![CurrencyPair::new("EUR", "USD")],
//!     risk_factor: dec!(1.2),
//!     ..Default::default()
//! };
//! let mut maker = MarketMaker::new("mm-EUR/USD", config, resolver);
//! let quotes = maker.place_orders(&mut order_books)?;
//! ```

pub mod market_maker;
pub mod market_taker;
pub mod sampling;

// Re-export main types
pub use market_maker::{MakerQuote, MarketMaker, MarketMakerConfig};
pub use market_taker::{Execution, MarketTaker};
