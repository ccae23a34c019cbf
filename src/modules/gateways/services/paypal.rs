use super::gateway_trait::{PaymentGateway, ProviderRequest};
use super::provider_http::{endpoint, read_json};
use crate::config::{PayPalConfig, PayPalCredentials};
use crate::core::{AppError, GatewayError, GatewayErrorKind, Provider, Result, SignatureError};
use crate::modules::gateways::models::{
    CaptureResult, IntentOutcome, LinkDescription, OrderResult, OrderStatus,
};
use crate::modules::webhooks::models::{WebhookDelivery, WebhookEvent};
use crate::modules::webhooks::services::event_mapper::{parse_payload, paypal_event};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{json, Value};
use std::time::Duration;

/// PayPal Checkout (Orders v2) client
///
/// API Documentation: https://developer.paypal.com/docs/api/orders/v2/
pub struct PayPalClient {
    client: Client,
    credentials: Option<PayPalCredentials>,
    webhook_id: Option<String>,
    base_url: String,
}

impl PayPalClient {
    /// Create a new PayPal client
    ///
    /// Credentials may be absent; every API call then fails with a
    /// `NotConfigured` gateway error instead of failing at startup.
    pub fn new(config: &PayPalConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build PayPal client: {}", e)))?;

        Ok(Self {
            client,
            credentials: config.credentials.clone(),
            webhook_id: config.webhook_id.clone(),
            base_url: config.base_url.clone(),
        })
    }

    fn credentials(&self) -> std::result::Result<&PayPalCredentials, GatewayError> {
        self.credentials.as_ref().ok_or_else(|| {
            GatewayError::new(
                Provider::PayPal,
                GatewayErrorKind::NotConfigured,
                "PayPal credentials not found in environment variables",
            )
        })
    }

    fn url(&self, segments: &[&str]) -> std::result::Result<Url, GatewayError> {
        endpoint(Provider::PayPal, &self.base_url, segments)
    }

    /// OAuth2 client-credentials token, requested fresh for each call
    async fn access_token(&self) -> std::result::Result<String, GatewayError> {
        let credentials = self.credentials()?;
        let url = self.url(&["v1", "oauth2", "token"])?;

        let response = self
            .client
            .post(url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| GatewayError::from_transport(Provider::PayPal, e))?;

        let token: AccessToken = read_json(Provider::PayPal, response).await?;
        Ok(token.access_token)
    }

    async fn fetch_order(&self, id: &str) -> std::result::Result<Value, GatewayError> {
        let token = self.access_token().await?;
        let url = self.url(&["v2", "checkout", "orders", id])?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GatewayError::from_transport(Provider::PayPal, e))?;

        read_json(Provider::PayPal, response).await
    }

    /// Asks PayPal whether the delivery's transmission signature is genuine
    async fn verify_with_paypal(
        &self,
        webhook_id: &str,
        delivery: &WebhookDelivery,
    ) -> std::result::Result<(), SignatureError> {
        let header = |name: &'static str| {
            delivery
                .header(name)
                .ok_or(SignatureError::MissingHeader(name))
        };
        let auth_algo = header("paypal-auth-algo")?;
        let cert_url = header("paypal-cert-url")?;
        let transmission_id = header("paypal-transmission-id")?;
        let transmission_sig = header("paypal-transmission-sig")?;
        let transmission_time = header("paypal-transmission-time")?;
        let webhook_event: &RawValue = std::str::from_utf8(&delivery.payload)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(text).map_err(|e| e.to_string()))
            .map_err(SignatureError::InvalidPayload)?;

        let rejected = |e: GatewayError| SignatureError::Rejected(e.message);
        let token = self.access_token().await.map_err(rejected)?;
        let url = self
            .url(&["v1", "notifications", "verify-webhook-signature"])
            .map_err(rejected)?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&VerifySignatureRequest {
                auth_algo,
                cert_url,
                transmission_id,
                transmission_sig,
                transmission_time,
                webhook_id,
                webhook_event,
            })
            .send()
            .await
            .map_err(|e| rejected(GatewayError::from_transport(Provider::PayPal, e)))?;

        let verification: VerificationResponse = read_json(Provider::PayPal, response)
            .await
            .map_err(rejected)?;

        if verification.verification_status != "SUCCESS" {
            return Err(SignatureError::Rejected(verification.verification_status));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for PayPalClient {
    async fn create_intent(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<IntentOutcome, GatewayError> {
        let ProviderRequest::PayPal(request) = request else {
            return Err(GatewayError::new(
                Provider::PayPal,
                GatewayErrorKind::InvalidRequest,
                "PayPal gateway received a request built for another provider",
            ));
        };

        let token = self.access_token().await?;
        let url = self.url(&["v2", "checkout", "orders"])?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .header("Prefer", "return=representation")
            .json(&request.to_body())
            .send()
            .await
            .map_err(|e| GatewayError::from_transport(Provider::PayPal, e))?;

        let raw: Value = read_json(Provider::PayPal, response).await?;
        let order = order_from_json(raw)?;

        tracing::info!(
            order_id = %order.order_id,
            value = %request.value,
            currency = %request.currency,
            "PayPal order created"
        );

        Ok(IntentOutcome::Order(order))
    }

    async fn capture_or_fetch(
        &self,
        id: &str,
        payer_id: Option<&str>,
    ) -> std::result::Result<CaptureResult, GatewayError> {
        let token = self.access_token().await?;
        let url = self.url(&["v2", "checkout", "orders", id, "capture"])?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .header("Prefer", "return=representation")
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| GatewayError::from_transport(Provider::PayPal, e))?;

        let raw: Value = read_json(Provider::PayPal, response).await?;
        let capture = capture_from_json(raw, payer_id)?;

        tracing::info!(
            order_id = %capture.reference_id,
            transaction_id = ?capture.transaction_id,
            amount = ?capture.amount,
            currency = ?capture.currency,
            status = %capture.provider_status,
            "PayPal donation captured"
        );

        Ok(capture)
    }

    async fn get_status(&self, id: &str) -> std::result::Result<IntentOutcome, GatewayError> {
        let raw = self.fetch_order(id).await?;
        Ok(IntentOutcome::Order(order_from_json(raw)?))
    }

    async fn verify_webhook(
        &self,
        delivery: &WebhookDelivery,
    ) -> std::result::Result<WebhookEvent, SignatureError> {
        let raw = parse_payload(&delivery.payload)?;

        match self.webhook_id.as_deref() {
            Some(webhook_id) => self.verify_with_paypal(webhook_id, delivery).await?,
            None => tracing::warn!(
                "PAYPAL_WEBHOOK_ID not configured, accepting PayPal webhook without signature verification"
            ),
        }

        Ok(paypal_event(raw))
    }

    fn provider(&self) -> Provider {
        Provider::PayPal
    }
}

fn order_from_json(raw: Value) -> std::result::Result<OrderResult, GatewayError> {
    let order: PayPalOrder =
        serde_json::from_value(raw.clone()).map_err(|e| GatewayError::decode(Provider::PayPal, e))?;

    Ok(OrderResult {
        status: OrderStatus::from_paypal(&order.status),
        order_id: order.id,
        payer_id: order.payer.and_then(|p| p.payer_id),
        links: order.links,
        raw,
    })
}

fn capture_from_json(
    raw: Value,
    payer_id: Option<&str>,
) -> std::result::Result<CaptureResult, GatewayError> {
    let order: PayPalOrder =
        serde_json::from_value(raw.clone()).map_err(|e| GatewayError::decode(Provider::PayPal, e))?;

    let capture = order
        .purchase_units
        .iter()
        .flat_map(|unit| unit.payments.iter())
        .flat_map(|payments| payments.captures.iter())
        .next();

    let status = OrderStatus::from_paypal(&order.status);

    Ok(CaptureResult {
        reference_id: order.id,
        transaction_id: capture.map(|c| c.id.clone()),
        status: status.into(),
        provider_status: order.status,
        payer_id: order
            .payer
            .and_then(|p| p.payer_id)
            .or_else(|| payer_id.map(String::from)),
        amount: capture.and_then(|c| c.amount.as_ref()).map(|a| a.value.clone()),
        currency: capture
            .and_then(|c| c.amount.as_ref())
            .map(|a| a.currency_code.clone()),
        raw,
    })
}

/// Body of `POST /v1/notifications/verify-webhook-signature`
///
/// `webhook_event` is the delivered body verbatim; PayPal checks the
/// transmission signature against those exact bytes.
#[derive(Serialize)]
struct VerifySignatureRequest<'a> {
    auth_algo: &'a str,
    cert_url: &'a str,
    transmission_id: &'a str,
    transmission_sig: &'a str,
    transmission_time: &'a str,
    webhook_id: &'a str,
    webhook_event: &'a RawValue,
}

// PayPal API response structures

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct VerificationResponse {
    verification_status: String,
}

#[derive(Debug, Deserialize)]
struct PayPalOrder {
    id: String,
    status: String,
    #[serde(default)]
    payer: Option<Payer>,
    #[serde(default)]
    links: Vec<LinkDescription>,
    #[serde(default)]
    purchase_units: Vec<PurchaseUnit>,
}

#[derive(Debug, Deserialize)]
struct Payer {
    #[serde(default)]
    payer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PurchaseUnit {
    #[serde(default)]
    payments: Option<Payments>,
}

#[derive(Debug, Deserialize)]
struct Payments {
    #[serde(default)]
    captures: Vec<Capture>,
}

#[derive(Debug, Deserialize)]
struct Capture {
    id: String,
    #[serde(default)]
    amount: Option<Money>,
}

#[derive(Debug, Deserialize)]
struct Money {
    currency_code: String,
    value: String,
}
