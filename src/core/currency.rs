use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

use super::error::ValidationError;

/// Currencies without a minor unit. Stripe and PayPal both reject decimals for these.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "HUF", "JPY", "KMF", "KRW", "MGA", "PYG", "RWF", "TWD", "UGX",
    "VND", "VUV", "XAF", "XOF", "XPF",
];

/// ISO-4217 currency code, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Returns the decimal scale for this currency
    /// - zero-decimal currencies (JPY, KRW, ...): 0
    /// - everything else: 2
    pub fn scale(&self) -> u32 {
        if ZERO_DECIMAL_CURRENCIES.contains(&self.0.as_str()) {
            0
        } else {
            2
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Major-unit amount as PayPal expects it in `amount.value`
    pub fn format_value(&self, amount: Decimal) -> String {
        let scale = self.scale() as usize;
        format!("{:.width$}", self.round(amount), width = scale)
    }

    /// Stripe wants lowercase codes
    pub fn to_stripe(&self) -> String {
        self.0.to_lowercase()
    }

    /// PayPal wants uppercase codes
    pub fn to_paypal(&self) -> String {
        self.0.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency(s.to_string()));
        }
        Ok(CurrencyCode(trimmed.to_ascii_uppercase()))
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
