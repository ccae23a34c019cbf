use std::sync::Arc;
use tracing::{info, warn};

use crate::core::{Provider, SignatureError};
use crate::modules::gateways::GatewayService;
use crate::modules::webhooks::models::{WebhookDelivery, WebhookEvent, WebhookEventKind};

/// Verifies webhook deliveries and records the outcome of each event
///
/// Nothing is persisted; an event is acknowledged once it is authenticated
/// and logged. Unknown event types are acknowledged too.
#[derive(Clone)]
pub struct WebhookHandler {
    gateways: Arc<GatewayService>,
}

impl WebhookHandler {
    pub fn new(gateways: Arc<GatewayService>) -> Self {
        Self { gateways }
    }

    /// Authenticate and classify a delivery, then log it by kind
    pub async fn process_webhook(
        &self,
        provider: Provider,
        delivery: &WebhookDelivery,
    ) -> Result<WebhookEvent, SignatureError> {
        let event = self.gateways.verify_webhook(provider, delivery).await?;
        log_event(&event);
        Ok(event)
    }
}

fn log_event(event: &WebhookEvent) {
    let provider = event.provider;
    let resource_id = event.resource_id.as_str();

    match event.kind {
        WebhookEventKind::PaymentSucceeded => {
            info!(gateway = %provider, payment_intent_id = %resource_id, "Payment succeeded")
        }
        WebhookEventKind::PaymentFailed => {
            warn!(gateway = %provider, payment_intent_id = %resource_id, "Payment failed")
        }
        WebhookEventKind::OrderApproved => {
            info!(gateway = %provider, order_id = %resource_id, "Order approved")
        }
        WebhookEventKind::OrderCompleted => {
            info!(gateway = %provider, resource_id = %resource_id, "Payment completed")
        }
        WebhookEventKind::OrderDenied => {
            warn!(gateway = %provider, resource_id = %resource_id, "Payment denied")
        }
        WebhookEventKind::Unhandled => info!(
            gateway = %provider,
            event_type = %event.event_type,
            "Unhandled event type"
        ),
    }
}
