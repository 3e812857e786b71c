//! FX Simulator Core Domain
//!
//! Pure domain types for the FX consensus pricing simulator.
//! This crate contains no I/O and no randomness, and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod instruments;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{BookLevel, BookSide, OrderBook, OrderBooks, Side};
pub use error::{BookError, PairError};
pub use instruments::CurrencyPair;
pub use values::{CurrencyCode, Price, Quantity};
