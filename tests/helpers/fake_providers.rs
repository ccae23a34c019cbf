// Fake Stripe and PayPal APIs
//
// Served over real HTTP with actix-test so the reqwest clients exercise URL
// building, authentication headers, form/JSON encoding and error decoding.

use actix_web::{web, App, HttpRequest, HttpResponse};
use base64::prelude::*;
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

pub use actix_test::TestServer;

use super::test_config::{PAYPAL_CLIENT_ID, PAYPAL_CLIENT_SECRET, STRIPE_SECRET_KEY};

pub const FAKE_PAYPAL_TOKEN: &str = "A21AAFakeAccessToken";

/// The one PayPal webhook body the fake verifier holds a signature for.
/// Keys are deliberately not in sorted order.
pub const PAYPAL_SIGNED_EVENT: &str = r#"{"id":"WH-2","event_version":"1.0","event_type":"PAYMENT.CAPTURE.COMPLETED","resource":{"id":"CAP-1","status":"COMPLETED"}}"#;

/// Base URL of a test server, without a trailing slash
pub fn base_url(srv: &TestServer) -> String {
    format!("http://{}", srv.addr())
}

fn authorization(req: &HttpRequest) -> &str {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

async fn stripe_create_intent(
    req: HttpRequest,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    if authorization(&req) != format!("Bearer {}", STRIPE_SECRET_KEY) {
        return HttpResponse::Unauthorized().json(json!({
            "error": {"message": "Invalid API Key provided", "type": "invalid_request_error"}
        }));
    }

    let amount: i64 = form.get("amount").and_then(|a| a.parse().ok()).unwrap_or(0);
    if amount == 1313 {
        return HttpResponse::PaymentRequired().json(json!({
            "error": {"message": "Your card was declined.", "type": "card_error"}
        }));
    }

    let metadata: HashMap<&str, &str> = form
        .iter()
        .filter_map(|(k, v)| {
            k.strip_prefix("metadata[")
                .and_then(|k| k.strip_suffix(']'))
                .map(|k| (k, v.as_str()))
        })
        .collect();

    HttpResponse::Ok().json(json!({
        "id": "pi_3MtwBwLkdIwHu7ix28a3tqPa",
        "object": "payment_intent",
        "amount": amount,
        "currency": form.get("currency").cloned().unwrap_or_default(),
        "client_secret": "pi_3MtwBwLkdIwHu7ix28a3tqPa_secret_YrKJUKribcBjcG8HVhfZluoGH",
        "status": "requires_payment_method",
        "automatic_payment_methods": {
            "enabled": form.get("automatic_payment_methods[enabled]").map(|v| v == "true")
        },
        "metadata": metadata,
        "latest_charge": null,
    }))
}

async fn stripe_retrieve_intent(path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    if id == "pi_missing" {
        return HttpResponse::NotFound().json(json!({
            "error": {
                "message": "No such payment_intent: 'pi_missing'",
                "type": "invalid_request_error"
            }
        }));
    }

    HttpResponse::Ok().json(json!({
        "id": id,
        "object": "payment_intent",
        "amount": 2500,
        "currency": "usd",
        "client_secret": format!("{}_secret_x", id),
        "status": "succeeded",
        "latest_charge": "ch_3MtwBwLkdIwHu7ix0snN0B15",
    }))
}

async fn stripe_slow() -> HttpResponse {
    tokio::time::sleep(Duration::from_secs(3)).await;
    HttpResponse::Ok().finish()
}

/// Fake Stripe API: create and retrieve payment intents
///
/// Amount 1313 is declined. `pi_missing` does not exist. `pi_slow` never
/// answers in time.
pub fn fake_stripe() -> TestServer {
    actix_test::start(|| {
        App::new()
            .route("/v1/payment_intents", web::post().to(stripe_create_intent))
            .route("/v1/payment_intents/pi_slow", web::get().to(stripe_slow))
            .route("/v1/payment_intents/{id}", web::get().to(stripe_retrieve_intent))
    })
}

async fn paypal_token(req: HttpRequest, form: web::Form<HashMap<String, String>>) -> HttpResponse {
    let expected = format!(
        "Basic {}",
        BASE64_STANDARD.encode(format!("{}:{}", PAYPAL_CLIENT_ID, PAYPAL_CLIENT_SECRET))
    );
    if authorization(&req) != expected
        || form.get("grant_type").map(String::as_str) != Some("client_credentials")
    {
        return HttpResponse::Unauthorized().json(json!({
            "error": "invalid_client",
            "error_description": "Client Authentication failed"
        }));
    }

    HttpResponse::Ok().json(json!({
        "scope": "https://uri.paypal.com/services/payments/payment",
        "access_token": FAKE_PAYPAL_TOKEN,
        "token_type": "Bearer",
        "app_id": "APP-80W284485P519543T",
        "expires_in": 32400,
    }))
}

fn paypal_authorized(req: &HttpRequest) -> bool {
    authorization(req) == format!("Bearer {}", FAKE_PAYPAL_TOKEN)
}

async fn paypal_create_order(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !paypal_authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let prefer = req
        .headers()
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    HttpResponse::Created().json(json!({
        "id": "5O190127TN364715T",
        "intent": body["intent"],
        "status": "PAYER_ACTION_REQUIRED",
        "purchase_units": body["purchase_units"],
        "application_context": body["application_context"],
        "prefer": prefer,
        "links": [
            {"href": "https://api-m.sandbox.paypal.com/v2/checkout/orders/5O190127TN364715T", "rel": "self", "method": "GET"},
            {"href": "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T", "rel": "payer-action", "method": "GET"}
        ]
    }))
}

async fn paypal_capture(req: HttpRequest, path: web::Path<String>) -> HttpResponse {
    if !paypal_authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let id = path.into_inner();
    if id == "NOT-APPROVED" {
        return HttpResponse::UnprocessableEntity().json(json!({
            "name": "UNPROCESSABLE_ENTITY",
            "message": "The requested action could not be performed, semantically incorrect, or failed business validation.",
            "details": [{
                "issue": "ORDER_NOT_APPROVED",
                "description": "Payer has not yet approved the Order for payment."
            }]
        }));
    }

    HttpResponse::Created().json(json!({
        "id": id,
        "status": "COMPLETED",
        "payer": {"payer_id": "FSMVU44LF3YUS"},
        "purchase_units": [{
            "payments": {
                "captures": [{
                    "id": "3C679366HH908993F",
                    "status": "COMPLETED",
                    "amount": {"currency_code": "USD", "value": "25.00"}
                }]
            }
        }],
        "links": []
    }))
}

async fn paypal_get_order(req: HttpRequest, path: web::Path<String>) -> HttpResponse {
    if !paypal_authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let id = path.into_inner();
    if id == "MISSING" {
        return HttpResponse::NotFound().json(json!({
            "name": "RESOURCE_NOT_FOUND",
            "message": "The specified resource does not exist.",
            "details": [{"issue": "INVALID_RESOURCE_ID", "description": "Specified resource ID does not exist."}]
        }));
    }

    HttpResponse::Ok().json(json!({
        "id": id,
        "intent": "CAPTURE",
        "status": "APPROVED",
        "payer": {"payer_id": "FSMVU44LF3YUS"},
        "links": []
    }))
}

#[derive(Deserialize)]
struct VerifySignature {
    transmission_sig: String,
    webhook_id: String,
    webhook_event: Box<RawValue>,
}

async fn paypal_verify_signature(req: HttpRequest, body: web::Json<VerifySignature>) -> HttpResponse {
    if !paypal_authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let status = if body.transmission_sig == "valid-signature"
        && body.webhook_id == "WH-TEST"
        && body.webhook_event.get() == PAYPAL_SIGNED_EVENT
    {
        "SUCCESS"
    } else {
        "FAILURE"
    };

    HttpResponse::Ok().json(json!({ "verification_status": status }))
}

/// Fake PayPal API: OAuth token, orders, capture and webhook verification
///
/// `NOT-APPROVED` cannot be captured. `MISSING` does not exist. Webhook
/// verification succeeds for `transmission_sig == "valid-signature"`, webhook
/// id `WH-TEST`, and a `webhook_event` byte-equal to `PAYPAL_SIGNED_EVENT`.
pub fn fake_paypal() -> TestServer {
    actix_test::start(|| {
        App::new()
            .route("/v1/oauth2/token", web::post().to(paypal_token))
            .route("/v2/checkout/orders", web::post().to(paypal_create_order))
            .route("/v2/checkout/orders/{id}/capture", web::post().to(paypal_capture))
            .route("/v2/checkout/orders/{id}", web::get().to(paypal_get_order))
            .route(
                "/v1/notifications/verify-webhook-signature",
                web::post().to(paypal_verify_signature),
            )
    })
}
