//! Depth-weighted VWAP
//!
//! A ladder is walked in price priority and truncated at a size budget. Each
//! level contributes its full size while the running total stays within the
//! budget; the level that crosses the budget contributes only the size still
//! needed to reach it, and every later level contributes nothing.

use fxsim_core::{BookLevel, BookSide, Price, Quantity};
use rust_decimal::Decimal;

/// Sort levels into price priority: bids descending, asks ascending
///
/// The sort is stable, so levels at equal prices keep their input order.
pub fn sort_by_priority(levels: &mut [BookLevel], side: BookSide) {
    match side {
        BookSide::Bid => levels.sort_by(|a, b| b.price.cmp(&a.price)),
        BookSide::Ask => levels.sort_by(|a, b| a.price.cmp(&b.price)),
    }
}

/// Size each level contributes when the ladder is truncated at `depth`
///
/// `levels` must already be in price priority. The running total never
/// exceeds `depth`, so sizes beyond the budget are never summed.
pub fn included_sizes(levels: &[BookLevel], depth: Quantity) -> Vec<Quantity> {
    let mut remaining = depth.max(Decimal::ZERO);
    levels
        .iter()
        .map(|level| {
            let take = level.size.max(Decimal::ZERO).min(remaining);
            remaining -= take;
            take
        })
        .collect()
}

/// Notional and size accumulated over a truncated ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepthWindow {
    /// Σ price × included size
    pub notional: Decimal,
    /// Σ included size
    pub size: Quantity,
}

impl DepthWindow {
    /// Truncate a price-sorted ladder at `depth`
    ///
    /// `None` when the notional does not fit in a `Decimal`.
    pub fn from_sorted(levels: &[BookLevel], depth: Quantity) -> Option<Self> {
        levels
            .iter()
            .zip(included_sizes(levels, depth))
            .filter(|(_, size)| !size.is_zero())
            .try_fold(Self::default(), |window, (level, size)| {
                Some(Self {
                    notional: window.notional.checked_add(level.price.checked_mul(size)?)?,
                    size: window.size.checked_add(size)?,
                })
            })
    }

    /// Volume-weighted average price, `None` if nothing was included
    pub fn average(&self) -> Option<Price> {
        self.notional.checked_div(self.size)
    }

    /// Volume-weighted average price, zero if nothing was included
    pub fn average_or_zero(&self) -> Price {
        self.average().unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn levels(pairs: &[(Decimal, Decimal)]) -> Vec<BookLevel> {
        pairs.iter().map(|(p, s)| BookLevel::new(*p, *s)).collect()
    }

    #[test]
    fn test_truncation_clips_crossing_level() {
        let bids = levels(&[
            (dec!(1.0905), dec!(1)),
            (dec!(1.0900), dec!(1)),
            (dec!(1.0895), dec!(5)),
        ]);

        assert_eq!(
            included_sizes(&bids, dec!(3)),
            vec![dec!(1), dec!(1), dec!(1)]
        );
        assert_eq!(
            included_sizes(&bids, dec!(5)),
            vec![dec!(1), dec!(1), dec!(3)]
        );
    }

    #[test]
    fn test_truncation_levels_after_budget_contribute_nothing() {
        let asks = levels(&[
            (dec!(1.10), dec!(4)),
            (dec!(1.11), dec!(1)),
            (dec!(1.12), dec!(1)),
        ]);

        // First level alone already exceeds the budget
        assert_eq!(
            included_sizes(&asks, dec!(2)),
            vec![dec!(2), dec!(0), dec!(0)]
        );
        // Budget exactly met by the first level
        assert_eq!(
            included_sizes(&asks, dec!(4)),
            vec![dec!(4), dec!(0), dec!(0)]
        );
        // Budget larger than the whole ladder
        assert_eq!(
            included_sizes(&asks, dec!(100)),
            vec![dec!(4), dec!(1), dec!(1)]
        );
    }

    #[test]
    fn test_sort_by_priority() {
        let mut bids = levels(&[(dec!(1.0), dec!(1)), (dec!(1.2), dec!(1)), (dec!(1.1), dec!(1))]);
        sort_by_priority(&mut bids, BookSide::Bid);
        let prices: Vec<_> = bids.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![dec!(1.2), dec!(1.1), dec!(1.0)]);

        let mut asks = levels(&[(dec!(1.3), dec!(1)), (dec!(1.1), dec!(1)), (dec!(1.2), dec!(1))]);
        sort_by_priority(&mut asks, BookSide::Ask);
        let prices: Vec<_> = asks.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![dec!(1.1), dec!(1.2), dec!(1.3)]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let mut bids = levels(&[(dec!(1.1), dec!(2)), (dec!(1.1), dec!(7)), (dec!(1.2), dec!(1))]);
        sort_by_priority(&mut bids, BookSide::Bid);
        assert_eq!(bids[1], BookLevel::new(dec!(1.1), dec!(2)));
        assert_eq!(bids[2], BookLevel::new(dec!(1.1), dec!(7)));
    }

    #[test]
    fn test_window_average() {
        let bids = levels(&[
            (dec!(1.0905), dec!(1)),
            (dec!(1.0900), dec!(1)),
            (dec!(1.0895), dec!(5)),
        ]);

        let window = DepthWindow::from_sorted(&bids, dec!(5)).unwrap();
        assert_eq!(window.size, dec!(5));
        assert_eq!(window.notional, dec!(5.449));
        assert_eq!(window.average(), Some(dec!(1.0898)));
    }

    #[test]
    fn test_empty_window_has_no_average() {
        let window = DepthWindow::from_sorted(&[], dec!(3)).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.average(), None);
        assert_eq!(window.average_or_zero(), Decimal::ZERO);

        // Zero-size levels do not make the window defined
        let zero = levels(&[(dec!(1.1), dec!(0))]);
        assert_eq!(DepthWindow::from_sorted(&zero, dec!(3)).unwrap().average(), None);
    }

    #[test]
    fn test_sizes_beyond_budget_are_never_summed() {
        let bids = levels(&[(dec!(1.0), Decimal::MAX), (dec!(1.0), Decimal::MAX)]);

        assert_eq!(included_sizes(&bids, dec!(3)), vec![dec!(3), dec!(0)]);
        let window = DepthWindow::from_sorted(&bids, dec!(3)).unwrap();
        assert_eq!(window.average(), Some(dec!(1.0)));
    }

    #[test]
    fn test_notional_overflow_has_no_window() {
        let asks = levels(&[(dec!(100000000000000000000), dec!(10000000000))]);
        assert_eq!(DepthWindow::from_sorted(&asks, dec!(10000000000)), None);
    }
}
