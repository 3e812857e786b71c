//! Consensus Price Engine
//!
//! Keeps the most recent order-book snapshot for every pair it has seen and
//! derives mid/spread valuations from them with depth-weighted VWAP.
//!
//! Mid and spread use two independent depth budgets. Each statistic
//! truncates the sorted ladders on its own, so changing `spread_depth`
//! never moves the mid and vice versa.

use crate::vwap::{DepthWindow, sort_by_priority};
use fxsim_core::{BookLevel, BookSide, CurrencyPair, OrderBook, Quantity};
use fxsim_ports::{PriceProduction, PriceQuote, PricingError, PricingResult};
use indexmap::IndexMap;
use log::{debug, warn};
use rust_decimal::Decimal;

/// Depth windows of both sides at both budgets
#[derive(Debug, Clone, Copy)]
struct LadderWindows {
    bid_mid: DepthWindow,
    ask_mid: DepthWindow,
    bid_spread: DepthWindow,
    ask_spread: DepthWindow,
}

/// Depth-weighted VWAP consensus engine
///
/// Snapshot store semantics: one snapshot per pair, last write wins, no
/// history. Stored books are owned copies, so later mutation of the caller's
/// book is invisible until the next `update`.
#[derive(Debug, Clone)]
pub struct ConsensusPriceEngine {
    /// Size budget for the mid price
    mid_depth: Quantity,
    /// Size budget for the spread
    spread_depth: Quantity,
    /// Latest snapshot per pair, in first-seen order
    books: IndexMap<CurrencyPair, OrderBook>,
}

impl ConsensusPriceEngine {
    /// Create an engine with the given depth budgets (both must be positive)
    pub fn new(mid_depth: Quantity, spread_depth: Quantity) -> PricingResult<Self> {
        for depth in [mid_depth, spread_depth] {
            if depth <= Decimal::ZERO {
                return Err(PricingError::InvalidDepth(depth));
            }
        }

        Ok(Self {
            mid_depth,
            spread_depth,
            books: IndexMap::new(),
        })
    }

    /// Replace the stored snapshot for the book's pair
    pub fn update(&mut self, order_book: &OrderBook) {
        let pair = order_book.currency_pair().clone();
        let replaced = self.books.insert(pair, order_book.clone()).is_some();
        debug!(
            "{} snapshot {} ({} bids, {} asks)",
            order_book.currency_pair(),
            if replaced { "replaced" } else { "added" },
            order_book.bids().len(),
            order_book.asks().len()
        );
    }

    /// Latest snapshot for a pair
    pub fn snapshot(&self, pair: &CurrencyPair) -> Option<&OrderBook> {
        self.books.get(pair)
    }

    /// Pairs with a stored snapshot, in first-seen order
    pub fn tracked_pairs(&self) -> impl Iterator<Item = &CurrencyPair> {
        self.books.keys()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Sort both ladders and truncate them at both budgets
    ///
    /// `None` if any window's notional overflows.
    fn windows(
        &self,
        mut bids: Vec<BookLevel>,
        mut asks: Vec<BookLevel>,
    ) -> Option<LadderWindows> {
        sort_by_priority(&mut bids, BookSide::Bid);
        sort_by_priority(&mut asks, BookSide::Ask);

        Some(LadderWindows {
            bid_mid: DepthWindow::from_sorted(&bids, self.mid_depth)?,
            ask_mid: DepthWindow::from_sorted(&asks, self.mid_depth)?,
            bid_spread: DepthWindow::from_sorted(&bids, self.spread_depth)?,
            ask_spread: DepthWindow::from_sorted(&asks, self.spread_depth)?,
        })
    }

    fn pooled_quote(&self) -> Option<PriceQuote> {
        let bids = self
            .books
            .values()
            .flat_map(|book| book.bids().iter().copied())
            .collect();
        let asks = self
            .books
            .values()
            .flat_map(|book| book.asks().iter().copied())
            .collect();
        let w = self.windows(bids, asks)?;

        let pooled_size = w.bid_mid.size.checked_add(w.ask_mid.size)?;
        let mid = if pooled_size.is_zero() {
            Decimal::ZERO
        } else {
            w.bid_mid
                .notional
                .checked_add(w.ask_mid.notional)?
                .checked_div(pooled_size)?
        };
        let spread = w
            .ask_spread
            .average_or_zero()
            .checked_sub(w.bid_spread.average_or_zero())?;

        Some(PriceQuote::new(mid, spread))
    }
}

impl PriceProduction for ConsensusPriceEngine {
    /// Pool every tracked book into one bid ladder and one ask ladder
    ///
    /// Pairs are not segregated, so books quoted on different price scales
    /// distort the result; the global view is for monitoring and as the last
    /// fallback of the crossing resolver.
    ///
    /// The mid is the pooled VWAP over both mid-depth windows. An empty side
    /// contributes nothing to the pool, and with no liquidity at all the mid
    /// is zero. The spread uses zero as the average of an empty side.
    ///
    /// A pool whose notional overflows is valued at zero.
    fn calculate_consensus_price(&self) -> PriceQuote {
        self.pooled_quote().unwrap_or_else(|| {
            warn!("Consensus notional overflowed across {} books", self.books.len());
            PriceQuote::default()
        })
    }

    fn calculate_pair_price(&self, pair: &CurrencyPair) -> PricingResult<PriceQuote> {
        let book = self
            .books
            .get(pair)
            .ok_or_else(|| PricingError::UntrackedPair(pair.clone()))?;

        let overflow = || PricingError::Overflow(pair.clone());
        let w = self
            .windows(book.bids().to_vec(), book.asks().to_vec())
            .ok_or_else(overflow)?;
        let empty = |side| PricingError::EmptySide {
            pair: pair.clone(),
            side,
        };

        let bid_mid = w.bid_mid.average().ok_or_else(|| empty(BookSide::Bid))?;
        let ask_mid = w.ask_mid.average().ok_or_else(|| empty(BookSide::Ask))?;
        let bid_spread = w.bid_spread.average().ok_or_else(|| empty(BookSide::Bid))?;
        let ask_spread = w.ask_spread.average().ok_or_else(|| empty(BookSide::Ask))?;

        let mid = bid_mid.checked_add(ask_mid).ok_or_else(overflow)? / Decimal::TWO;
        let spread = ask_spread.checked_sub(bid_spread).ok_or_else(overflow)?;
        Ok(PriceQuote::new(mid, spread))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn book(
        pair: &CurrencyPair,
        bids: &[(Decimal, Decimal)],
        asks: &[(Decimal, Decimal)],
    ) -> OrderBook {
        let mut book = OrderBook::new(pair.clone(), 10);
        let (bp, bs): (Vec<_>, Vec<_>) = bids.iter().copied().unzip();
        let (ap, asz): (Vec<_>, Vec<_>) = asks.iter().copied().unzip();
        book.update_bid(&bp, &bs).unwrap();
        book.update_ask(&ap, &asz).unwrap();
        book
    }

    #[test]
    fn test_rejects_non_positive_depth() {
        assert_eq!(
            ConsensusPriceEngine::new(dec!(0), dec!(3)).unwrap_err(),
            PricingError::InvalidDepth(dec!(0))
        );
        assert_eq!(
            ConsensusPriceEngine::new(dec!(3), dec!(-1)).unwrap_err(),
            PricingError::InvalidDepth(dec!(-1))
        );
    }

    #[test]
    fn test_update_is_last_write_wins() {
        let eur_usd = CurrencyPair::new("EUR", "USD");
        let mut engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();

        engine.update(&book(&eur_usd, &[(dec!(1.00), dec!(1))], &[(dec!(1.02), dec!(1))]));
        engine.update(&book(&eur_usd, &[(dec!(1.10), dec!(1))], &[(dec!(1.12), dec!(1))]));

        assert_eq!(engine.len(), 1);
        let quote = engine.calculate_pair_price(&eur_usd).unwrap();
        assert_eq!(quote.mid, dec!(1.11));
        assert_eq!(quote.spread, dec!(0.02));
    }

    #[test]
    fn test_stored_snapshot_is_a_copy() {
        let eur_usd = CurrencyPair::new("EUR", "USD");
        let mut engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();
        let mut live = book(&eur_usd, &[(dec!(1.00), dec!(1))], &[(dec!(1.02), dec!(1))]);
        engine.update(&live);

        live.update_bid(&[dec!(0.50)], &[dec!(1)]).unwrap();

        assert_eq!(engine.snapshot(&eur_usd).unwrap().bids()[0].price, dec!(1.00));
    }

    #[test]
    fn test_update_leaves_other_pairs_alone() {
        let eur_usd = CurrencyPair::new("EUR", "USD");
        let gbp_usd = CurrencyPair::new("GBP", "USD");
        let mut engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();

        engine.update(&book(&eur_usd, &[(dec!(1.00), dec!(1))], &[(dec!(1.02), dec!(1))]));
        engine.update(&book(&gbp_usd, &[(dec!(1.26), dec!(1))], &[(dec!(1.28), dec!(1))]));

        assert_eq!(engine.calculate_pair_price(&eur_usd).unwrap().mid, dec!(1.01));
        assert_eq!(engine.calculate_pair_price(&gbp_usd).unwrap().mid, dec!(1.27));
        let tracked: Vec<_> = engine.tracked_pairs().cloned().collect();
        assert_eq!(tracked, vec![eur_usd, gbp_usd]);
    }

    #[test]
    fn test_pair_price_untracked() {
        let engine = ConsensusPriceEngine::new(dec!(3), dec!(3)).unwrap();
        let pair = CurrencyPair::new("EUR", "USD");
        assert_eq!(
            engine.calculate_pair_price(&pair),
            Err(PricingError::UntrackedPair(pair))
        );
    }

    #[test]
    fn test_pair_price_empty_side() {
        let pair = CurrencyPair::new("EUR", "USD");
        let mut engine = ConsensusPriceEngine::new(dec!(3), dec!(3)).unwrap();

        engine.update(&book(&pair, &[(dec!(1.09), dec!(1))], &[]));
        assert_eq!(
            engine.calculate_pair_price(&pair),
            Err(PricingError::EmptySide {
                pair: pair.clone(),
                side: BookSide::Ask
            })
        );

        // Levels present but all zero size
        engine.update(&book(&pair, &[(dec!(1.09), dec!(0))], &[(dec!(1.10), dec!(1))]));
        let err = engine.calculate_pair_price(&pair).unwrap_err();
        assert_eq!(
            err,
            PricingError::EmptySide {
                pair,
                side: BookSide::Bid
            }
        );
        assert!(err.is_undefined_price());
    }

    #[test]
    fn test_pair_price_sorts_unsorted_ladders() {
        let pair = CurrencyPair::new("EUR", "USD");
        let mut engine = ConsensusPriceEngine::new(dec!(1), dec!(1)).unwrap();

        // Worst prices written first; the engine must still pick the best
        engine.update(&book(
            &pair,
            &[(dec!(1.08), dec!(1)), (dec!(1.09), dec!(1))],
            &[(dec!(1.12), dec!(1)), (dec!(1.11), dec!(1))],
        ));

        let quote = engine.calculate_pair_price(&pair).unwrap();
        assert_eq!(quote.mid, dec!(1.10));
        assert_eq!(quote.spread, dec!(0.02));
    }

    #[test]
    fn test_pair_price_overflow_is_an_error() {
        let pair = CurrencyPair::new("EUR", "USD");
        let mut engine = ConsensusPriceEngine::new(dec!(10000000000), dec!(3)).unwrap();
        let huge = dec!(100000000000000000000);

        engine.update(&book(&pair, &[(huge, dec!(10000000000))], &[(huge, dec!(10000000000))]));

        let err = engine.calculate_pair_price(&pair).unwrap_err();
        assert_eq!(err, PricingError::Overflow(pair));
        assert!(err.is_undefined_price());
        assert_eq!(engine.calculate_consensus_price(), PriceQuote::default());
    }

    #[test]
    fn test_consensus_with_no_books_is_zero() {
        let engine = ConsensusPriceEngine::new(dec!(3), dec!(3)).unwrap();
        assert_eq!(engine.calculate_consensus_price(), PriceQuote::default());
    }
}
