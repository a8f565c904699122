//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Indian rupees, the storefront's only currency.
    #[must_use]
    pub const fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// Format for display (e.g., "₹2999" or "₹1299.5").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.amount.normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
}

impl CurrencyCode {
    /// Currency symbol used in listings.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_drops_trailing_zeros() {
        assert_eq!(Price::inr(Decimal::new(299_900, 2)).display(), "₹2999");
        assert_eq!(Price::inr(Decimal::new(129_950, 2)).display(), "₹1299.5");
    }

    #[test]
    fn test_default_currency_is_inr() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::INR);
        assert_eq!(Price::new(Decimal::ONE, CurrencyCode::default()).to_string(), "₹1");
    }

    #[test]
    fn test_display_matches_doc_examples() {
        let whole = Price::inr(Decimal::new(2999, 0));
        let fractional = Price::inr(Decimal::new(12_995, 1));
        assert_eq!(whole.to_string(), "₹2999");
        assert_eq!(fractional.to_string(), "₹1299.5");
    }
}
