//! Uniform sampling into decimals
//!
//! Agents draw from `f64` ranges and convert, rounding to a fixed number of
//! places so logged prices stay readable.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Decimal places kept from a sampled `f64`
pub const SAMPLE_DP: u32 = 8;

/// Seeded generator when `seed` is set, entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw from `[min, max)`; a degenerate or inverted range yields `min`
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min { rng.gen_range(min..max) } else { min }
}

/// Draw from `[min, max)` and convert, zero if the draw is not finite
pub fn uniform_decimal<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Decimal {
    Decimal::from_f64(uniform(rng, min, max))
        .map(|d| d.round_dp(SAMPLE_DP))
        .unwrap_or(Decimal::ZERO)
}
