use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

use crate::core::{Provider, ValidationError};
use crate::modules::donations::models::ValidatedAmount;

/// Stripe bounds, in cents
pub const STRIPE_MIN_AMOUNT: i64 = 50;
pub const STRIPE_MAX_AMOUNT: i64 = 999_999;

const STRIPE_BELOW_MINIMUM: &str = "Amount must be at least $0.50 (50 cents)";
const STRIPE_ABOVE_MAXIMUM: &str = "Amount cannot exceed $9,999.99";
const PAYPAL_BELOW_MINIMUM: &str = "Amount must be at least $1.00";
const PAYPAL_TOO_LARGE: &str = "Amount is too large";

/// Checks donation amounts against each provider's bounds before any network call
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountValidator;

/// Parsed amount, or the sign of a number too large for `Decimal`
enum Numeric {
    Finite(Decimal),
    TooLarge,
    TooSmall,
}

impl AmountValidator {
    pub fn new() -> Self {
        Self
    }

    /// PayPal minimum, in dollars
    pub fn paypal_min_amount() -> Decimal {
        Decimal::ONE
    }

    /// Validate an amount for the given provider
    ///
    /// Stripe amounts are minor units and fractional input is rounded half away
    /// from zero once it is within bounds. PayPal amounts are major units.
    pub fn validate(
        &self,
        amount: Option<&Value>,
        provider: Provider,
    ) -> Result<ValidatedAmount, ValidationError> {
        let numeric = amount
            .and_then(numeric)
            .ok_or_else(|| missing(provider))?;

        match provider {
            Provider::Stripe => validate_stripe(numeric),
            Provider::PayPal => validate_paypal(numeric),
        }
    }
}

fn validate_stripe(numeric: Numeric) -> Result<ValidatedAmount, ValidationError> {
    let amount = match numeric {
        Numeric::Finite(amount) => amount,
        Numeric::TooLarge => return Err(above_maximum(Provider::Stripe, STRIPE_ABOVE_MAXIMUM)),
        Numeric::TooSmall => return Err(below_minimum(Provider::Stripe, STRIPE_BELOW_MINIMUM)),
    };

    if amount < Decimal::from(STRIPE_MIN_AMOUNT) {
        return Err(below_minimum(Provider::Stripe, STRIPE_BELOW_MINIMUM));
    }
    if amount > Decimal::from(STRIPE_MAX_AMOUNT) {
        return Err(above_maximum(Provider::Stripe, STRIPE_ABOVE_MAXIMUM));
    }

    // Within bounds, so the rounded value always fits
    let cents = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(STRIPE_MAX_AMOUNT);

    Ok(ValidatedAmount::MinorUnits(cents))
}

fn validate_paypal(numeric: Numeric) -> Result<ValidatedAmount, ValidationError> {
    let amount = match numeric {
        Numeric::Finite(amount) => amount,
        Numeric::TooLarge => return Err(above_maximum(Provider::PayPal, PAYPAL_TOO_LARGE)),
        Numeric::TooSmall => return Err(below_minimum(Provider::PayPal, PAYPAL_BELOW_MINIMUM)),
    };

    if amount < AmountValidator::paypal_min_amount() {
        return Err(below_minimum(Provider::PayPal, PAYPAL_BELOW_MINIMUM));
    }

    Ok(ValidatedAmount::MajorUnits(amount.normalize()))
}

/// JSON numbers and decimal strings are numeric; everything else is not
fn numeric(value: &Value) -> Option<Numeric> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };

    if let Ok(amount) = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        return Some(Numeric::Finite(amount));
    }

    // Outside Decimal's range: keep only the magnitude class
    let float: f64 = text.parse().ok().filter(|f: &f64| f.is_finite())?;
    Some(if float.abs() < 1.0 {
        Numeric::Finite(Decimal::ZERO)
    } else if float > 0.0 {
        Numeric::TooLarge
    } else {
        Numeric::TooSmall
    })
}

/// Clients get the same wording as an amount below the minimum
fn missing(provider: Provider) -> ValidationError {
    let message = match provider {
        Provider::Stripe => STRIPE_BELOW_MINIMUM,
        Provider::PayPal => PAYPAL_BELOW_MINIMUM,
    };
    ValidationError::Missing {
        provider,
        message: message.to_string(),
    }
}

fn below_minimum(provider: Provider, message: &str) -> ValidationError {
    ValidationError::BelowMinimum {
        provider,
        message: message.to_string(),
    }
}

fn above_maximum(provider: Provider, message: &str) -> ValidationError {
    ValidationError::AboveMaximum {
        provider,
        message: message.to_string(),
    }
}
