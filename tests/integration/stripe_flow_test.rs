// Stripe donation flow over HTTP against a stub gateway
//
// POST /create-payment-intent and its alias POST /api/stripe/payment-intent.

#[path = "../helpers/mod.rs"]
#[macro_use]
mod helpers;

use actix_web::test;
use donation_bridge::core::Provider;
use donation_bridge::gateways::{GatewayService, ProviderRequest};
use helpers::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

#[actix_web::test]
async fn test_create_payment_intent_returns_client_secret() {
    let app = test_app!(app_state(stub_gateways()));

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .set_json(json!({"amount": 1000, "currency": "usd"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["clientSecret"], STUB_CLIENT_SECRET);
    assert_eq!(body["paymentIntentId"], STUB_INTENT_ID);
}

#[actix_web::test]
async fn test_alias_route_behaves_the_same() {
    let app = test_app!(app_state(stub_gateways()));

    let req = test::TestRequest::post()
        .uri("/api/stripe/payment-intent")
        .set_json(json!({"amount": 2500}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["clientSecret"], STUB_CLIENT_SECRET);
}

#[actix_web::test]
async fn test_amount_below_minimum_is_rejected() {
    let app = test_app!(app_state(stub_gateways()));

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .set_json(json!({"amount": 10}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Amount must be at least $0.50 (50 cents)");
}

#[actix_web::test]
async fn test_amount_above_maximum_is_rejected() {
    let app = test_app!(app_state(stub_gateways()));

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .set_json(json!({"amount": 1_000_000}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Amount cannot exceed $9,999.99");
}

#[actix_web::test]
async fn test_missing_amount_is_rejected() {
    let app = test_app!(app_state(stub_gateways()));

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .set_json(json!({"currency": "usd"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Amount must be at least $0.50 (50 cents)");
}

#[actix_web::test]
async fn test_validation_failure_never_reaches_the_provider() {
    let stripe = StubGateway::new(Provider::Stripe);
    let requests = stripe.requests();
    let gateways = GatewayService::new(Duration::from_secs(5)).with_gateway(Arc::new(stripe));
    let app = test_app!(app_state(gateways));

    for body in [json!({"amount": 49}), json!({"amount": "abc"}), json!({"amount": 100, "currency": "dollars"})] {
        let req = test::TestRequest::post()
            .uri("/create-payment-intent")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    assert!(requests.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_request_carries_origin_and_metadata() {
    let stripe = StubGateway::new(Provider::Stripe);
    let requests = stripe.requests();
    let gateways = GatewayService::new(Duration::from_secs(5)).with_gateway(Arc::new(stripe));
    let app = test_app!(app_state(gateways));

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .insert_header(("Origin", "https://shavahn.example.org"))
        .set_json(json!({"amount": 1234.5, "metadata": {"campaign": "easter"}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let recorded = requests.lock().unwrap();
    let ProviderRequest::Stripe(stripe) = &recorded[0] else {
        panic!("expected a Stripe request");
    };
    assert_eq!(stripe.amount, 1235);
    assert_eq!(stripe.currency, "usd");
    assert_eq!(stripe.metadata["origin"], "https://shavahn.example.org");
    assert_eq!(stripe.metadata["campaign"], "easter");
    assert_eq!(stripe.metadata["app"], "shavahn-bible");
}

#[actix_web::test]
async fn test_provider_error_is_passed_through() {
    let gateways = GatewayService::new(Duration::from_secs(5)).with_gateway(Arc::new(
        StubGateway::failing(Provider::Stripe, 402, "Your card was declined."),
    ));
    let app = test_app!(app_state(gateways));

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .set_json(json!({"amount": 1000}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Your card was declined.");
    assert_eq!(body["type"], "stripe_error");
}

#[actix_web::test]
async fn test_malformed_body_is_400() {
    let app = test_app!(app_state(stub_gateways()));

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"amount\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}
