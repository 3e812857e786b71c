//! Instrument definitions
//!
//! The simulator only trades spot FX, so the single instrument type is the
//! currency pair.

mod currency_pair;

pub use currency_pair::CurrencyPair;
