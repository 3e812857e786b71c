//! Price Crossing
//!
//! Decides, per target pair, whether its mid comes from its own book
//! ("direct") or is synthesized through a pivot currency ("cross"):
//! A/B ≈ (A/X) × (X/B).
//!
//! Strategies are fixed once at construction. A cross request is only kept
//! when both legs are among the target pairs; otherwise it degrades to
//! direct, and the degradation stays queryable.

mod resolver;
mod selector;
mod strategy;

pub use resolver::{DEFAULT_PIVOTS, PriceCrossingResolver};
pub use selector::{RandomStrategySelector, StrategySelector};
pub use strategy::{MidPriceTier, PricingStrategy, ResolvedMid, StrategyRecord, cross_legs};
