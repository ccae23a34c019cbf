use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::info;

use crate::core::{Provider, Result};
use crate::modules::webhooks::models::WebhookDelivery;
use crate::modules::webhooks::services::WebhookHandler;

/// Acknowledgement body, identical for every accepted event type
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Receive a Stripe webhook
///
/// POST /webhook
///
/// The body is read as raw bytes: the signature covers the exact payload.
///
/// # Returns
/// * `200 OK` - `{"received": true}`, also for event types we do not act on
/// * `400 Bad Request` - plain text `Webhook Error: ...` when verification fails
pub async fn stripe_webhook(
    req: HttpRequest,
    body: web::Bytes,
    handler: web::Data<WebhookHandler>,
) -> Result<HttpResponse> {
    receive(Provider::Stripe, &req, body, &handler).await
}

/// Receive a PayPal webhook
///
/// POST /api/paypal/webhook
pub async fn paypal_webhook(
    req: HttpRequest,
    body: web::Bytes,
    handler: web::Data<WebhookHandler>,
) -> Result<HttpResponse> {
    receive(Provider::PayPal, &req, body, &handler).await
}

async fn receive(
    provider: Provider,
    req: &HttpRequest,
    body: web::Bytes,
    handler: &WebhookHandler,
) -> Result<HttpResponse> {
    info!(gateway = %provider, bytes = body.len(), "Received webhook request");

    let delivery = delivery_from_request(req, body);
    let event = handler.process_webhook(provider, &delivery).await?;

    info!(
        gateway = %provider,
        event_type = %event.event_type,
        kind = ?event.kind,
        "Webhook acknowledged"
    );

    Ok(HttpResponse::Ok().json(WebhookAck { received: true }))
}

/// Copy the body and every readable header into a delivery
fn delivery_from_request(req: &HttpRequest, body: web::Bytes) -> WebhookDelivery {
    req.headers()
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
        .fold(WebhookDelivery::new(body.to_vec()), |delivery, (name, value)| {
            delivery.with_header(name, value)
        })
}

/// Configure webhook routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::post().to(stripe_webhook))
        .route("/api/paypal/webhook", web::post().to(paypal_webhook));
}
