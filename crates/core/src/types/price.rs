//! Monetary amounts using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with its ISO 4217 currency code.
///
/// Shopify sends amounts as decimal strings (`"12.99"`); they are kept as
/// [`Decimal`] and serialized back as strings so no precision is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Format for display (e.g., `$19.99`, `€5.00`, `12.50 SEK`).
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.round_dp(2);
        currency_symbol(&self.currency_code).map_or_else(
            || format!("{amount:.2} {}", self.currency_code),
            |symbol| format!("{symbol}{amount:.2}"),
        )
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" | "NZD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_display_known_currency() {
        let money = Money::new(Decimal::from_str("19.9").unwrap(), "USD");
        assert_eq!(money.display(), "$19.90");

        let money = Money::new(Decimal::from_str("5").unwrap(), "EUR");
        assert_eq!(money.to_string(), "€5.00");
    }

    #[test]
    fn test_display_unknown_currency() {
        let money = Money::new(Decimal::from_str("12.5").unwrap(), "SEK");
        assert_eq!(money.display(), "12.50 SEK");
    }

    #[test]
    fn test_amount_serializes_as_string() {
        let money = Money::new(Decimal::from_str("12.99").unwrap(), "USD");
        let json = serde_json::to_value(&money).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "amount": "12.99", "currency_code": "USD" })
        );

        let parsed: Money = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, money);
    }

    #[test]
    fn test_zero() {
        assert_eq!(Money::zero("USD").display(), "$0.00");
    }
}
