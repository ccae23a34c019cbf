use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment providers the bridge talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Stripe,
    PayPal,
}

impl Provider {
    /// Human-readable name used in log records and error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Stripe => "Stripe",
            Provider::PayPal => "PayPal",
        }
    }

    /// Default currency when the caller omits one
    pub fn default_currency(&self) -> &'static str {
        match self {
            Provider::Stripe => "usd",
            Provider::PayPal => "USD",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Stripe => write!(f, "stripe"),
            Provider::PayPal => write!(f, "paypal"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stripe" => Ok(Provider::Stripe),
            "paypal" => Ok(Provider::PayPal),
            _ => Err(format!("Unsupported provider: {}", s)),
        }
    }
}
