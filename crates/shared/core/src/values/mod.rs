use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value (order size, depth budget) - uses Decimal for precision
pub type Quantity = Decimal;

/// ISO-style currency code (e.g., "EUR", "USD")
pub type CurrencyCode = String;
