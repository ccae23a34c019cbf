use super::gateway_trait::{PaymentGateway, ProviderRequest};
use super::provider_http::{endpoint, read_json};
use crate::config::StripeConfig;
use crate::core::{AppError, GatewayError, GatewayErrorKind, Provider, Result, SignatureError};
use crate::modules::gateways::models::{
    CaptureResult, IntentOutcome, IntentStatus, PaymentIntentResult,
};
use crate::modules::webhooks::models::{WebhookDelivery, WebhookEvent};
use crate::modules::webhooks::services::event_mapper::{parse_payload, stripe_event};
use crate::modules::webhooks::services::StripeSignatureVerifier;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Stripe payment gateway client
///
/// Talks to the Stripe REST API directly (form-encoded requests, bearer auth).
/// API Documentation: https://docs.stripe.com/api/payment_intents
pub struct StripeClient {
    client: Client,
    secret_key: String,
    webhook_secret: Option<String>,
    webhook_tolerance_secs: i64,
    base_url: String,
}

impl StripeClient {
    /// Create a new Stripe client
    ///
    /// # Arguments
    /// * `config` - Stripe keys and base URL
    /// * `timeout` - per-request deadline applied by reqwest
    pub fn new(config: &StripeConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build Stripe client: {}", e)))?;

        Ok(Self {
            client,
            secret_key: config.secret_key.clone(),
            webhook_secret: config.webhook_secret.clone(),
            webhook_tolerance_secs: config.webhook_tolerance_secs,
            base_url: config.base_url.clone(),
        })
    }

    async fn retrieve_intent(
        &self,
        id: &str,
    ) -> std::result::Result<StripePaymentIntent, GatewayError> {
        let url = endpoint(Provider::Stripe, &self.base_url, &["v1", "payment_intents", id])?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| GatewayError::from_transport(Provider::Stripe, e))?;

        read_json(Provider::Stripe, response).await
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_intent(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<IntentOutcome, GatewayError> {
        let ProviderRequest::Stripe(request) = request else {
            return Err(GatewayError::new(
                Provider::Stripe,
                GatewayErrorKind::InvalidRequest,
                "Stripe gateway received a request built for another provider",
            ));
        };

        let url = endpoint(Provider::Stripe, &self.base_url, &["v1", "payment_intents"])?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.secret_key)
            .form(&request.to_form())
            .send()
            .await
            .map_err(|e| GatewayError::from_transport(Provider::Stripe, e))?;

        let intent: StripePaymentIntent = read_json(Provider::Stripe, response).await?;

        tracing::info!(
            payment_intent_id = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            "Payment intent created"
        );

        Ok(IntentOutcome::Intent(intent.into()))
    }

    async fn capture_or_fetch(
        &self,
        id: &str,
        _payer_id: Option<&str>,
    ) -> std::result::Result<CaptureResult, GatewayError> {
        // Automatic capture: the intent settles on its own once confirmed client-side
        let intent = self.retrieve_intent(id).await?;
        let status = IntentStatus::from_stripe(&intent.status);

        Ok(CaptureResult {
            reference_id: intent.id.clone(),
            transaction_id: intent.latest_charge.clone(),
            status: status.into(),
            provider_status: intent.status.clone(),
            payer_id: None,
            amount: Some(intent.amount.to_string()),
            currency: Some(intent.currency.clone()),
            raw: serde_json::to_value(&intent).unwrap_or_default(),
        })
    }

    async fn get_status(&self, id: &str) -> std::result::Result<IntentOutcome, GatewayError> {
        let intent = self.retrieve_intent(id).await?;
        Ok(IntentOutcome::Intent(intent.into()))
    }

    async fn verify_webhook(
        &self,
        delivery: &WebhookDelivery,
    ) -> std::result::Result<WebhookEvent, SignatureError> {
        let secret = self
            .webhook_secret
            .as_deref()
            .ok_or(SignatureError::SecretNotConfigured)?;
        let header = delivery
            .header("stripe-signature")
            .ok_or(SignatureError::MissingHeader("stripe-signature"))?;

        StripeSignatureVerifier::new(secret, self.webhook_tolerance_secs)
            .verify(&delivery.payload, header)?;

        let raw = parse_payload(&delivery.payload)?;
        Ok(stripe_event(raw))
    }

    fn provider(&self) -> Provider {
        Provider::Stripe
    }
}

// Stripe API response structures

#[derive(Debug, Deserialize, serde::Serialize)]
struct StripePaymentIntent {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    status: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    latest_charge: Option<String>,
}

impl From<StripePaymentIntent> for PaymentIntentResult {
    fn from(intent: StripePaymentIntent) -> Self {
        PaymentIntentResult {
            status: IntentStatus::from_stripe(&intent.status),
            provider_intent_id: intent.id,
            client_secret: intent.client_secret,
            amount: intent.amount,
            currency: intent.currency,
        }
    }
}
