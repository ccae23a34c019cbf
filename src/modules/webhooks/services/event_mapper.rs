use serde_json::Value;

use super::super::models::{WebhookEvent, WebhookEventKind};
use crate::core::{Provider, SignatureError};

/// Stripe `type` values the bridge reacts to
const STRIPE_EVENT_KINDS: &[(&str, WebhookEventKind)] = &[
    ("payment_intent.succeeded", WebhookEventKind::PaymentSucceeded),
    ("payment_intent.payment_failed", WebhookEventKind::PaymentFailed),
];

/// PayPal `event_type` values the bridge reacts to
const PAYPAL_EVENT_KINDS: &[(&str, WebhookEventKind)] = &[
    ("CHECKOUT.ORDER.APPROVED", WebhookEventKind::OrderApproved),
    ("CHECKOUT.ORDER.COMPLETED", WebhookEventKind::OrderCompleted),
    ("PAYMENT.CAPTURE.COMPLETED", WebhookEventKind::OrderCompleted),
    ("PAYMENT.CAPTURE.DENIED", WebhookEventKind::OrderDenied),
];

/// Maps a provider event type to its internal kind. Total: anything not in the
/// provider's table is `Unhandled`.
pub fn map_event_type(provider: Provider, event_type: &str) -> WebhookEventKind {
    let table = match provider {
        Provider::Stripe => STRIPE_EVENT_KINDS,
        Provider::PayPal => PAYPAL_EVENT_KINDS,
    };

    table
        .iter()
        .find(|(name, _)| *name == event_type)
        .map(|(_, kind)| *kind)
        .unwrap_or(WebhookEventKind::Unhandled)
}

/// Builds a `WebhookEvent` from a Stripe event body (`type`, `data.object.id`)
pub fn stripe_event(raw: Value) -> WebhookEvent {
    let event_type = raw["type"].as_str().unwrap_or_default().to_string();
    let resource_id = raw["data"]["object"]["id"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    WebhookEvent {
        provider: Provider::Stripe,
        kind: map_event_type(Provider::Stripe, &event_type),
        event_type,
        resource_id,
        raw,
    }
}

/// Builds a `WebhookEvent` from a PayPal event body (`event_type`, `resource.id`)
pub fn paypal_event(raw: Value) -> WebhookEvent {
    let event_type = raw["event_type"].as_str().unwrap_or_default().to_string();
    let resource_id = raw["resource"]["id"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    WebhookEvent {
        provider: Provider::PayPal,
        kind: map_event_type(Provider::PayPal, &event_type),
        event_type,
        resource_id,
        raw,
    }
}

/// Parses a webhook body, rejecting anything that is not a JSON object
pub fn parse_payload(payload: &[u8]) -> Result<Value, SignatureError> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| SignatureError::InvalidPayload(e.to_string()))?;
    if !value.is_object() {
        return Err(SignatureError::InvalidPayload(
            "expected a JSON object".to_string(),
        ));
    }
    Ok(value)
}
