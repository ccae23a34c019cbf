// Provider request construction
//
// Fixed metadata keys, currency normalization and the PayPal order shape.

#[path = "../helpers/mod.rs"]
#[macro_use]
mod helpers;

use donation_bridge::core::ValidationError;
use donation_bridge::donations::{IntentRequestBuilder, ValidatedAmount};
use donation_bridge::gateways::ProviderRequest;
use helpers::test_config;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn builder() -> IntentRequestBuilder {
    IntentRequestBuilder::new(&test_config().app)
}

#[test]
fn test_stripe_form_carries_fixed_metadata() {
    let request = builder()
        .build(
            ValidatedAmount::MinorUnits(1000),
            Some("usd"),
            None,
            Some("capacitor://localhost"),
        )
        .unwrap();

    let ProviderRequest::Stripe(stripe) = request else {
        panic!("expected a Stripe request");
    };
    let form = stripe.to_form();

    assert!(form.contains(&("amount".to_string(), "1000".to_string())));
    assert!(form.contains(&("currency".to_string(), "usd".to_string())));
    assert!(form.contains(&(
        "automatic_payment_methods[enabled]".to_string(),
        "true".to_string()
    )));
    assert!(form.contains(&("metadata[app]".to_string(), "shavahn-bible".to_string())));
    assert!(form.contains(&("metadata[type]".to_string(), "donation".to_string())));
    assert!(form.contains(&(
        "metadata[origin]".to_string(),
        "capacitor://localhost".to_string()
    )));
}

#[test]
fn test_paypal_body_shape() {
    let request = builder()
        .build(ValidatedAmount::MajorUnits(dec!(10.5)), None, None, None)
        .unwrap();

    let ProviderRequest::PayPal(paypal) = request else {
        panic!("expected a PayPal request");
    };
    let body = paypal.to_body();

    assert_eq!(body["intent"], "CAPTURE");
    assert_eq!(body["purchase_units"][0]["amount"]["currency_code"], "USD");
    assert_eq!(body["purchase_units"][0]["amount"]["value"], "10.50");
    assert_eq!(
        body["purchase_units"][0]["description"],
        "Donation to Shavahn Bible App Ministry"
    );
    assert_eq!(
        body["application_context"]["return_url"],
        "http://localhost:3000/paypal/success"
    );
    assert_eq!(
        body["application_context"]["cancel_url"],
        "http://localhost:3000/paypal/cancel"
    );
    assert_eq!(body["application_context"]["brand_name"], "Shavahn Bible App");
    assert_eq!(body["application_context"]["user_action"], "PAY_NOW");
}

#[test]
fn test_caller_metadata_overrides_fixed_keys() {
    let caller = json!({"app": "other-app", "note": "in memory of"});

    let request = builder()
        .build(ValidatedAmount::MinorUnits(1000), None, caller.as_object(), None)
        .unwrap();

    assert_eq!(request.metadata()["app"], "other-app");
    assert_eq!(request.metadata()["note"], "in memory of");
    assert_eq!(request.metadata()["type"], "donation");
}

#[test]
fn test_currency_must_be_three_letters() {
    for currency in ["", "us", "usdx", "u$d", "123"] {
        let err = builder()
            .build(ValidatedAmount::MinorUnits(1000), Some(currency), None, None)
            .unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidCurrency(_)),
            "currency {:?} accepted",
            currency
        );
    }
}

proptest! {
    #[test]
    fn test_fixed_keys_present_without_caller_metadata(amount in 50i64..=999_999i64) {
        let request = builder()
            .build(ValidatedAmount::MinorUnits(amount), None, None, None)
            .unwrap();

        let metadata = request.metadata();
        prop_assert_eq!(metadata["app"].as_str(), "shavahn-bible");
        prop_assert_eq!(metadata["type"].as_str(), "donation");
        prop_assert_eq!(metadata["origin"].as_str(), "unknown");
    }

    #[test]
    fn test_paypal_value_has_two_decimals(cents in 100i64..100_000_000i64) {
        let amount = Decimal::new(cents, 2);
        let request = builder()
            .build(ValidatedAmount::MajorUnits(amount), Some("usd"), None, None)
            .unwrap();

        let ProviderRequest::PayPal(paypal) = request else {
            panic!("expected a PayPal request");
        };
        prop_assert_eq!(paypal.currency.as_str(), "USD");
        prop_assert_eq!(paypal.value, format!("{}.{:02}", cents / 100, cents % 100));
    }
}
