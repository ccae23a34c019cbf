use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::Provider;

/// Internal classification of provider webhook events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventKind {
    PaymentSucceeded,
    PaymentFailed,
    OrderApproved,
    OrderCompleted,
    OrderDenied,
    Unhandled,
}

impl WebhookEventKind {
    pub fn is_handled(&self) -> bool {
        !matches!(self, WebhookEventKind::Unhandled)
    }
}

/// Verified (or, for PayPal without a webhook id, merely parsed) webhook event
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEvent {
    pub provider: Provider,
    pub kind: WebhookEventKind,
    /// Event type string verbatim from the provider
    pub event_type: String,
    /// Payment intent id (Stripe) or resource id (PayPal); empty when absent
    pub resource_id: String,
    pub raw: serde_json::Value,
}

/// Raw webhook delivery as received over HTTP
#[derive(Debug, Clone, Default)]
pub struct WebhookDelivery {
    pub payload: Vec<u8>,
    /// Header names are stored lowercase
    headers: BTreeMap<String, String>,
}

impl WebhookDelivery {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
