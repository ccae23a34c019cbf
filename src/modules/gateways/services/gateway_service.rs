use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use super::gateway_trait::{PaymentGateway, ProviderRequest};
use super::{PayPalClient, StripeClient};
use crate::config::Config;
use crate::core::{GatewayError, GatewayErrorKind, Provider, SignatureError};
use crate::modules::gateways::models::{CaptureResult, IntentOutcome};
use crate::modules::webhooks::models::{WebhookDelivery, WebhookEvent};

/// Routes calls to the configured payment gateways.
///
/// Built once at startup; read-only afterwards. Every provider call is bounded
/// by `call_timeout`.
pub struct GatewayService {
    gateways: HashMap<Provider, Arc<dyn PaymentGateway>>,
    call_timeout: Duration,
}

impl GatewayService {
    pub fn new(call_timeout: Duration) -> Self {
        Self {
            gateways: HashMap::new(),
            call_timeout,
        }
    }

    /// Stripe and PayPal clients from configuration, sharing one deadline
    pub fn from_config(config: &Config) -> crate::core::Result<Self> {
        let timeout = Duration::from_secs(config.gateway.timeout_secs);

        let stripe = StripeClient::new(&config.stripe, timeout)?;
        let paypal = PayPalClient::new(&config.paypal, timeout)?;

        if config.paypal.credentials.is_none() {
            warn!("PayPal credentials not configured, PayPal routes will answer with paypal_error");
        }
        if config.stripe.webhook_secret.is_none() {
            warn!("STRIPE_WEBHOOK_SECRET not configured, Stripe webhooks will be rejected");
        }

        Ok(Self::new(timeout)
            .with_gateway(Arc::new(stripe))
            .with_gateway(Arc::new(paypal)))
    }

    /// Register a gateway, replacing any previous one for the same provider
    pub fn register_gateway(&mut self, gateway: Arc<dyn PaymentGateway>) {
        self.gateways.insert(gateway.provider(), gateway);
    }

    pub fn with_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.register_gateway(gateway);
        self
    }

    /// Get the gateway for a provider
    pub fn get_gateway(&self, provider: Provider) -> Result<Arc<dyn PaymentGateway>, GatewayError> {
        self.gateways.get(&provider).cloned().ok_or_else(|| {
            GatewayError::new(
                provider,
                GatewayErrorKind::NotConfigured,
                format!("{} gateway is not configured", provider.display_name()),
            )
        })
    }

    /// Providers that have a gateway registered
    pub fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<Provider> = self.gateways.keys().copied().collect();
        providers.sort_by_key(|p| p.to_string());
        providers
    }

    /// Create a payment intent or order with the provider the request was built for
    pub async fn create_intent(&self, request: ProviderRequest) -> Result<IntentOutcome, GatewayError> {
        let provider = request.provider();
        info!(gateway = %provider, "Creating payment with gateway");

        let gateway = self.get_gateway(provider)?;
        self.bounded(provider, "create_intent", gateway.create_intent(request))
            .await
    }

    pub async fn capture_or_fetch(
        &self,
        provider: Provider,
        id: &str,
        payer_id: Option<&str>,
    ) -> Result<CaptureResult, GatewayError> {
        info!(gateway = %provider, reference = %id, "Capturing payment");

        let gateway = self.get_gateway(provider)?;
        self.bounded(provider, "capture_or_fetch", gateway.capture_or_fetch(id, payer_id))
            .await
    }

    pub async fn get_status(&self, provider: Provider, id: &str) -> Result<IntentOutcome, GatewayError> {
        let gateway = self.get_gateway(provider)?;
        self.bounded(provider, "get_status", gateway.get_status(id))
            .await
    }

    /// Verify a webhook delivery. Fails closed: an unregistered provider or an
    /// expired deadline is reported as a signature failure.
    pub async fn verify_webhook(
        &self,
        provider: Provider,
        delivery: &WebhookDelivery,
    ) -> Result<WebhookEvent, SignatureError> {
        let gateway = self
            .get_gateway(provider)
            .map_err(|e| SignatureError::Rejected(e.message))?;

        match tokio::time::timeout(self.call_timeout, gateway.verify_webhook(delivery)).await {
            Ok(Ok(event)) => Ok(event),
            Ok(Err(e)) => {
                warn!(gateway = %provider, error = %e, "Webhook signature verification failed");
                Err(e)
            }
            Err(_) => {
                let e = GatewayError::timeout(provider, self.call_timeout.as_secs());
                warn!(gateway = %provider, error = %e, "Webhook verification timed out");
                Err(SignatureError::Rejected(e.message))
            }
        }
    }

    /// Apply the per-call deadline and log the outcome
    async fn bounded<T, F>(&self, provider: Provider, operation: &'static str, call: F) -> Result<T, GatewayError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        let result = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::timeout(provider, self.call_timeout.as_secs())),
        };

        if let Err(e) = &result {
            error!(
                gateway = %provider,
                operation = operation,
                kind = ?e.kind,
                error = %e,
                "Gateway call failed"
            );
        }

        result
    }
}
