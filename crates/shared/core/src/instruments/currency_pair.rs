use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PairError;
use crate::values::CurrencyCode;

/// A spot FX pair (e.g., EUR/USD, GBP/SEK)
///
/// Equality is ordered: EUR/USD and USD/EUR are different instruments and
/// nothing in the system inverts one into the other. Serialized as the
/// `"BASE/QUOTE"` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    /// Base currency (the one being bought/sold)
    base: CurrencyCode,
    /// Quote currency (the one used to price the base)
    quote: CurrencyCode,
}

impl CurrencyPair {
    /// Create a pair from trusted codes, without validation
    pub fn new(base: impl Into<CurrencyCode>, quote: impl Into<CurrencyCode>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Create a pair, validating and upper-casing both codes
    pub fn try_new(base: &str, quote: &str) -> Result<Self, PairError> {
        let base = normalize_code(base)?;
        let quote = normalize_code(quote)?;
        if base == quote {
            return Err(PairError::SameCurrency(base));
        }
        Ok(Self { base, quote })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// True if either leg of the pair is `currency`
    pub fn contains(&self, currency: &str) -> bool {
        self.base == currency || self.quote == currency
    }

    pub fn as_tuple(&self) -> (&str, &str) {
        (&self.base, &self.quote)
    }
}

fn normalize_code(code: &str) -> Result<CurrencyCode, PairError> {
    let code = code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PairError::InvalidCurrency(code.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, quote)) if !quote.contains('/') => Self::try_new(base, quote),
            _ => Err(PairError::Malformed(s.to_string())),
        }
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = PairError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pair_display() {
        let pair = CurrencyPair::new("EUR", "USD");
        assert_eq!(format!("{}", pair), "EUR/USD");
        assert_eq!(pair.as_tuple(), ("EUR", "USD"));
    }

    #[test]
    fn test_pair_equality_is_ordered() {
        let eur_usd = CurrencyPair::new("EUR", "USD");
        let usd_eur = CurrencyPair::new("USD", "EUR");
        assert_ne!(eur_usd, usd_eur);
        assert_eq!(eur_usd, CurrencyPair::new("EUR", "USD"));

        let set: HashSet<_> = [eur_usd.clone(), usd_eur, eur_usd].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_normalizes_case() {
        let pair: CurrencyPair = " eur/Usd".parse().unwrap();
        assert_eq!(pair, CurrencyPair::new("EUR", "USD"));
        assert!(pair.contains("USD"));
        assert!(!pair.contains("GBP"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            "EURUSD".parse::<CurrencyPair>(),
            Err(PairError::Malformed("EURUSD".to_string()))
        );
        assert!(matches!(
            "EUR/USD/GBP".parse::<CurrencyPair>(),
            Err(PairError::Malformed(_))
        ));
        assert_eq!(
            "EUR/".parse::<CurrencyPair>(),
            Err(PairError::InvalidCurrency(String::new()))
        );
        assert!(matches!(
            "EUR/U5D".parse::<CurrencyPair>(),
            Err(PairError::InvalidCurrency(_))
        ));
        assert_eq!(
            "usd/USD".parse::<CurrencyPair>(),
            Err(PairError::SameCurrency("USD".to_string()))
        );
    }

    #[test]
    fn test_serde_as_string() {
        let pair = CurrencyPair::new("GBP", "SEK");
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"GBP/SEK\"");

        let back: CurrencyPair = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);

        assert!(serde_json::from_str::<CurrencyPair>("\"GBPSEK\"").is_err());
    }
}
