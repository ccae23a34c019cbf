use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::Provider;
use crate::modules::gateways::models::LinkDescription;

/// Donation request body shared by the Stripe and PayPal create endpoints
///
/// `amount` is kept as raw JSON so the validator decides what counts as numeric.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationRequest {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Amount that passed the provider's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAmount {
    /// Stripe: integer minor units
    MinorUnits(i64),
    /// PayPal: decimal major units
    MajorUnits(Decimal),
}

impl ValidatedAmount {
    pub fn provider(&self) -> Provider {
        match self {
            ValidatedAmount::MinorUnits(_) => Provider::Stripe,
            ValidatedAmount::MajorUnits(_) => Provider::PayPal,
        }
    }
}

/// Body of `POST /api/paypal/execute-payment`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutePaymentRequest {
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub payer_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub id: String,
    /// Same value as `id`, the field name the PayPal JS SDK reads
    #[serde(rename = "orderID")]
    pub order_id: String,
    pub status: String,
    pub links: Vec<LinkDescription>,
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutePaymentResponse {
    pub success: bool,
    pub payment_id: String,
    pub transaction_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}
