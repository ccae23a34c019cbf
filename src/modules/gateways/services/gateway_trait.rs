use crate::core::{GatewayError, Provider, SignatureError};
use crate::modules::gateways::models::{CaptureResult, IntentOutcome};
use crate::modules::webhooks::models::{WebhookDelivery, WebhookEvent};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

/// Payment provider capabilities the bridge relies on.
///
/// Every method issues its provider request(s) once. Failures are wrapped in
/// `GatewayError` and returned; nothing here retries.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent (Stripe) or checkout order (PayPal)
    async fn create_intent(&self, request: ProviderRequest) -> Result<IntentOutcome, GatewayError>;

    /// Capture an approved order (PayPal) or read the intent state (Stripe)
    async fn capture_or_fetch(
        &self,
        id: &str,
        payer_id: Option<&str>,
    ) -> Result<CaptureResult, GatewayError>;

    /// Fetch the current provider-side state
    async fn get_status(&self, id: &str) -> Result<IntentOutcome, GatewayError>;

    /// Authenticate a webhook delivery and classify its event
    async fn verify_webhook(&self, delivery: &WebhookDelivery)
        -> Result<WebhookEvent, SignatureError>;

    fn provider(&self) -> Provider;
}

/// Provider-specific create request produced by the request builder
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderRequest {
    Stripe(StripeIntentRequest),
    PayPal(PayPalOrderRequest),
}

impl ProviderRequest {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderRequest::Stripe(_) => Provider::Stripe,
            ProviderRequest::PayPal(_) => Provider::PayPal,
        }
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        match self {
            ProviderRequest::Stripe(r) => &r.metadata,
            ProviderRequest::PayPal(r) => &r.metadata,
        }
    }
}

/// Body of `POST /v1/payment_intents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripeIntentRequest {
    /// Minor units
    pub amount: i64,
    /// Lowercase ISO-4217
    pub currency: String,
    pub metadata: BTreeMap<String, String>,
    pub automatic_payment_methods: bool,
}

impl StripeIntentRequest {
    /// Flatten into Stripe's bracketed form encoding
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![
            ("amount".to_string(), self.amount.to_string()),
            ("currency".to_string(), self.currency.clone()),
        ];
        if self.automatic_payment_methods {
            form.push((
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ));
        }
        for (key, value) in &self.metadata {
            form.push((format!("metadata[{}]", key), value.clone()));
        }
        form
    }
}

/// Body of `POST /v2/checkout/orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayPalOrderRequest {
    /// Always `CAPTURE`
    pub intent: String,
    /// Uppercase ISO-4217
    pub currency: String,
    /// Major units formatted to the currency's decimal places
    pub value: String,
    pub description: String,
    pub return_url: String,
    pub cancel_url: String,
    pub brand_name: String,
    pub user_action: String,
    /// Kept for logging; PayPal orders carry no free-form metadata
    pub metadata: BTreeMap<String, String>,
}

impl PayPalOrderRequest {
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "intent": self.intent,
            "application_context": {
                "return_url": self.return_url,
                "cancel_url": self.cancel_url,
                "brand_name": self.brand_name,
                "user_action": self.user_action,
            },
            "purchase_units": [{
                "amount": {
                    "currency_code": self.currency,
                    "value": self.value,
                },
                "description": self.description,
            }],
        })
    }
}
