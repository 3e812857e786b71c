use fxsim_core::{BookSide, CurrencyPair, Quantity};
use thiserror::Error;

/// Domain-level errors for price production
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("No order book tracked for {0}")]
    UntrackedPair(CurrencyPair),

    #[error("No {side} liquidity for {pair}")]
    EmptySide { pair: CurrencyPair, side: BookSide },

    #[error("Valuation of {0} does not fit in a decimal")]
    Overflow(CurrencyPair),

    #[error("Depth budget must be positive, got {0}")]
    InvalidDepth(Quantity),
}

impl PricingError {
    /// True for the errors that mean "no price can be derived for this pair"
    pub fn is_undefined_price(&self) -> bool {
        matches!(
            self,
            PricingError::UntrackedPair(_)
                | PricingError::EmptySide { .. }
                | PricingError::Overflow(_)
        )
    }
}

pub type PricingResult<T> = std::result::Result<T, PricingError>;
