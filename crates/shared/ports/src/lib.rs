//! FX Simulator Ports
//!
//! Port definitions (traits) for the FX consensus pricing simulator.
//! These define the boundary between the price engine and its consumers
//! (crossing resolver, market makers, simulation driver).

mod error;
mod production;

pub use error::{PricingError, PricingResult};
pub use production::{PriceProduction, PriceQuote};
