use super::selector::StrategySelector;
use super::strategy::{MidPriceTier, PricingStrategy, ResolvedMid, StrategyRecord, cross_legs};
use fxsim_core::{CurrencyCode, CurrencyPair, Price};
use fxsim_ports::PriceProduction;
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Pivot currencies tried when no candidate set is configured
pub const DEFAULT_PIVOTS: [&str; 3] = ["USD", "EUR", "GBP"];

static DIRECT: PricingStrategy = PricingStrategy::Direct;

/// Resolves one mid price per target pair from a price producer
///
/// Fallback chain for a cross pair: cross legs → the pair's own book →
/// global consensus. A direct pair skips the first step. The global
/// consensus never fails, so neither does resolution.
#[derive(Debug)]
pub struct PriceCrossingResolver<P> {
    prices: P,
    target_pairs: Vec<CurrencyPair>,
    strategies: IndexMap<CurrencyPair, StrategyRecord>,
}

impl<P: PriceProduction> PriceCrossingResolver<P> {
    /// Price every target pair directly
    pub fn new(target_pairs: Vec<CurrencyPair>, prices: P) -> Self {
        Self::with_strategies(target_pairs, prices, std::iter::empty())
    }

    /// Build from explicitly requested strategies
    ///
    /// Targets without a request are priced directly. Requests for pairs
    /// that are not targets are ignored.
    pub fn with_strategies(
        target_pairs: Vec<CurrencyPair>,
        prices: P,
        requested: impl IntoIterator<Item = (CurrencyPair, PricingStrategy)>,
    ) -> Self {
        let mut requested: HashMap<_, _> = requested.into_iter().collect();
        let tracked: HashSet<&CurrencyPair> = target_pairs.iter().collect();

        let mut strategies = IndexMap::with_capacity(target_pairs.len());
        for pair in &target_pairs {
            let request = requested.remove(pair).unwrap_or_default();
            let effective = validate(pair, &request, &tracked);
            strategies.insert(
                pair.clone(),
                StrategyRecord {
                    requested: request,
                    effective,
                },
            );
        }

        Self {
            prices,
            target_pairs,
            strategies,
        }
    }

    /// Let a selector request a strategy for every target pair
    ///
    /// Each pair is offered the candidate pivots minus its own two
    /// currencies; the selector's requests are then validated as in
    /// [`Self::with_strategies`].
    pub fn initialize<S, Sel>(
        target_pairs: Vec<CurrencyPair>,
        prices: P,
        pivot_candidates: &[S],
        selector: &mut Sel,
    ) -> Self
    where
        S: AsRef<str>,
        Sel: StrategySelector + ?Sized,
    {
        let requested: Vec<_> = target_pairs
            .iter()
            .map(|pair| {
                let pivots: Vec<CurrencyCode> = pivot_candidates
                    .iter()
                    .map(|p| p.as_ref())
                    .filter(|p| !pair.contains(p))
                    .map(str::to_string)
                    .collect();
                (pair.clone(), selector.select(pair, &pivots))
            })
            .collect();

        Self::with_strategies(target_pairs, prices, requested)
    }

    pub fn target_pairs(&self) -> &[CurrencyPair] {
        &self.target_pairs
    }

    pub fn prices(&self) -> &P {
        &self.prices
    }

    /// Effective strategy for a pair; direct for unknown pairs
    pub fn get_strategy(&self, pair: &CurrencyPair) -> &PricingStrategy {
        self.strategies
            .get(pair)
            .map(|record| &record.effective)
            .unwrap_or(&DIRECT)
    }

    /// Strategy that was asked for, before leg validation
    pub fn requested_strategy(&self, pair: &CurrencyPair) -> &PricingStrategy {
        self.strategies
            .get(pair)
            .map(|record| &record.requested)
            .unwrap_or(&DIRECT)
    }

    pub fn is_degraded(&self, pair: &CurrencyPair) -> bool {
        self.strategies
            .get(pair)
            .is_some_and(StrategyRecord::is_degraded)
    }

    /// Pairs whose cross request fell back to direct
    pub fn degraded_pairs(&self) -> impl Iterator<Item = &CurrencyPair> {
        self.strategies
            .iter()
            .filter(|(_, record)| record.is_degraded())
            .map(|(pair, _)| pair)
    }

    /// All strategy records, in target order
    pub fn strategies(&self) -> impl Iterator<Item = (&CurrencyPair, &StrategyRecord)> {
        self.strategies.iter()
    }

    /// Mid price for a pair, following the fallback chain
    pub fn generate_mid_price(&self, pair: &CurrencyPair) -> Price {
        self.resolve_mid_price(pair).price
    }

    /// Mid price for a pair, with the tier that produced it
    pub fn resolve_mid_price(&self, pair: &CurrencyPair) -> ResolvedMid {
        if let PricingStrategy::Cross { pivot } = self.get_strategy(pair) {
            let (first, second) = cross_legs(pair, pivot);
            match (
                self.prices.calculate_pair_price(&first),
                self.prices.calculate_pair_price(&second),
            ) {
                (Ok(a), Ok(b)) => match a.mid.checked_mul(b.mid) {
                    Some(price) => {
                        return ResolvedMid {
                            price,
                            tier: MidPriceTier::Cross,
                        };
                    }
                    None => debug!("{}: cross via {} overflowed, trying direct", pair, pivot),
                },
                (Err(err), _) | (_, Err(err)) => {
                    debug!("{}: cross via {} unavailable ({}), trying direct", pair, pivot, err)
                }
            }
        }

        match self.prices.calculate_pair_price(pair) {
            Ok(quote) => ResolvedMid {
                price: quote.mid,
                tier: MidPriceTier::Direct,
            },
            Err(err) => {
                debug!("{}: direct price unavailable ({}), using global consensus", pair, err);
                ResolvedMid {
                    price: self.prices.calculate_consensus_price().mid,
                    tier: MidPriceTier::Consensus,
                }
            }
        }
    }
}

/// Effective strategy for a request, given the set of tracked pairs
fn validate(
    pair: &CurrencyPair,
    requested: &PricingStrategy,
    tracked: &HashSet<&CurrencyPair>,
) -> PricingStrategy {
    let PricingStrategy::Cross { pivot } = requested else {
        return PricingStrategy::Direct;
    };

    if pair.contains(pivot) {
        warn!("{}: pivot {} is a leg of the pair itself, pricing direct", pair, pivot);
        return PricingStrategy::Direct;
    }

    let (first, second) = cross_legs(pair, pivot);
    let missing: Vec<_> = [&first, &second]
        .into_iter()
        .filter(|leg| !tracked.contains(leg))
        .map(ToString::to_string)
        .collect();

    if missing.is_empty() {
        requested.clone()
    } else {
        warn!(
            "{}: cross via {} needs {} which {} not tracked, pricing direct",
            pair,
            pivot,
            missing.join(" and "),
            if missing.len() == 1 { "is" } else { "are" }
        );
        PricingStrategy::Direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConsensusPriceEngine;
    use fxsim_core::OrderBook;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    fn quoted(p: &CurrencyPair, bid: Decimal, ask: Decimal) -> OrderBook {
        let mut book = OrderBook::new(p.clone(), 1);
        book.update_bid(&[bid], &[dec!(10)]).unwrap();
        book.update_ask(&[ask], &[dec!(10)]).unwrap();
        book
    }

    fn targets() -> Vec<CurrencyPair> {
        vec![pair("EUR/USD"), pair("USD/SEK"), pair("EUR/SEK"), pair("GBP/SEK")]
    }

    #[test]
    fn test_unknown_pair_defaults_to_direct() {
        let engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();
        let resolver = PriceCrossingResolver::new(targets(), &engine);

        assert_eq!(resolver.get_strategy(&pair("AUD/NZD")), &PricingStrategy::Direct);
        assert!(!resolver.is_degraded(&pair("AUD/NZD")));
    }

    #[test]
    fn test_cross_kept_when_legs_tracked() {
        let engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();
        let resolver = PriceCrossingResolver::with_strategies(
            targets(),
            &engine,
            [(pair("EUR/SEK"), PricingStrategy::cross("USD"))],
        );

        assert_eq!(resolver.get_strategy(&pair("EUR/SEK")), &PricingStrategy::cross("USD"));
        assert_eq!(resolver.get_strategy(&pair("EUR/USD")), &PricingStrategy::Direct);
        assert_eq!(resolver.degraded_pairs().count(), 0);
    }

    #[test]
    fn test_cross_degrades_when_leg_missing() {
        let engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();
        // GBP/USD is not a target, so GBP/SEK via USD cannot be crossed
        let resolver = PriceCrossingResolver::with_strategies(
            targets(),
            &engine,
            [(pair("GBP/SEK"), PricingStrategy::cross("USD"))],
        );

        assert_eq!(resolver.get_strategy(&pair("GBP/SEK")), &PricingStrategy::Direct);
        assert_eq!(
            resolver.requested_strategy(&pair("GBP/SEK")),
            &PricingStrategy::cross("USD")
        );
        assert!(resolver.is_degraded(&pair("GBP/SEK")));
        let degraded: Vec<_> = resolver.degraded_pairs().cloned().collect();
        assert_eq!(degraded, vec![pair("GBP/SEK")]);
    }

    #[test]
    fn test_pivot_equal_to_leg_degrades() {
        let engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();
        let resolver = PriceCrossingResolver::with_strategies(
            targets(),
            &engine,
            [(pair("EUR/USD"), PricingStrategy::cross("USD"))],
        );
        assert_eq!(resolver.get_strategy(&pair("EUR/USD")), &PricingStrategy::Direct);
        assert!(resolver.is_degraded(&pair("EUR/USD")));
    }

    #[test]
    fn test_initialize_excludes_own_currencies_from_pivots() {
        let engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();
        let mut offered: Vec<(CurrencyPair, Vec<CurrencyCode>)> = Vec::new();
        let mut selector = |p: &CurrencyPair, pivots: &[CurrencyCode]| {
            offered.push((p.clone(), pivots.to_vec()));
            pivots
                .first()
                .map(|pivot| PricingStrategy::cross(pivot.clone()))
                .unwrap_or_default()
        };

        let resolver =
            PriceCrossingResolver::initialize(targets(), &engine, &DEFAULT_PIVOTS, &mut selector);

        assert_eq!(offered[0], (pair("EUR/USD"), vec!["GBP".to_string()]));
        assert_eq!(
            offered[2],
            (pair("EUR/SEK"), vec!["USD".to_string(), "GBP".to_string()])
        );
        // EUR/SEK via USD has both legs
        assert_eq!(resolver.get_strategy(&pair("EUR/SEK")), &PricingStrategy::cross("USD"));
        // EUR/USD via GBP lacks EUR/GBP and GBP/USD
        assert!(resolver.is_degraded(&pair("EUR/USD")));
    }

    #[test]
    fn test_cross_mid_is_product_of_legs() {
        let mut engine = ConsensusPriceEngine::new(dec!(10), dec!(10)).unwrap();
        engine.update(&quoted(&pair("EUR/USD"), dec!(1.09), dec!(1.11)));
        engine.update(&quoted(&pair("USD/SEK"), dec!(10.2), dec!(10.4)));
        engine.update(&quoted(&pair("EUR/SEK"), dec!(11.0), dec!(11.2)));

        let resolver = PriceCrossingResolver::with_strategies(
            targets(),
            &engine,
            [(pair("EUR/SEK"), PricingStrategy::cross("USD"))],
        );

        let resolved = resolver.resolve_mid_price(&pair("EUR/SEK"));
        assert_eq!(resolved.tier, MidPriceTier::Cross);
        assert_eq!(resolved.price, dec!(1.10) * dec!(10.3));
        assert_eq!(resolver.generate_mid_price(&pair("EUR/SEK")), dec!(11.33));
    }

    #[test]
    fn test_cross_falls_back_to_direct_then_consensus() {
        let mut engine = ConsensusPriceEngine::new(dec!(10), dec!(10)).unwrap();
        // Only one leg quoted
        engine.update(&quoted(&pair("EUR/USD"), dec!(1.09), dec!(1.11)));

        {
            let resolver = PriceCrossingResolver::with_strategies(
                targets(),
                &engine,
                [(pair("EUR/SEK"), PricingStrategy::cross("USD"))],
            );
            // Neither leg pair nor the target has a full book: global consensus
            let resolved = resolver.resolve_mid_price(&pair("EUR/SEK"));
            assert_eq!(resolved.tier, MidPriceTier::Consensus);
            assert_eq!(resolved.price, dec!(1.10));
        }

        engine.update(&quoted(&pair("EUR/SEK"), dec!(11.0), dec!(11.2)));
        let resolver = PriceCrossingResolver::with_strategies(
            targets(),
            &engine,
            [(pair("EUR/SEK"), PricingStrategy::cross("USD"))],
        );
        let resolved = resolver.resolve_mid_price(&pair("EUR/SEK"));
        assert_eq!(resolved.tier, MidPriceTier::Direct);
        assert_eq!(resolved.price, dec!(11.1));
    }

    #[test]
    fn test_direct_falls_back_to_consensus() {
        let mut engine = ConsensusPriceEngine::new(dec!(10), dec!(10)).unwrap();
        engine.update(&quoted(&pair("EUR/USD"), dec!(1.09), dec!(1.11)));
        let resolver = PriceCrossingResolver::new(targets(), &engine);

        assert_eq!(
            resolver.resolve_mid_price(&pair("EUR/USD")),
            ResolvedMid {
                price: dec!(1.10),
                tier: MidPriceTier::Direct
            }
        );
        let fallback = resolver.resolve_mid_price(&pair("USD/SEK"));
        assert_eq!(fallback.tier, MidPriceTier::Consensus);
        assert_eq!(fallback.price, dec!(1.10));
    }

    #[test]
    fn test_no_liquidity_anywhere_resolves_to_zero() {
        let engine = ConsensusPriceEngine::new(dec!(3), dec!(3)).unwrap();
        let resolver = PriceCrossingResolver::new(targets(), &engine);
        assert_eq!(resolver.generate_mid_price(&pair("EUR/USD")), Decimal::ZERO);
    }
}
