// In-process payment gateways
//
// `StubGateway` answers like a healthy provider and records every create
// request it receives, or fails every call with a fixed `GatewayError`.

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use donation_bridge::core::{GatewayError, GatewayErrorKind, Provider, SignatureError};
use donation_bridge::gateways::models::LinkDescription;
use donation_bridge::gateways::{
    CaptureResult, GatewayService, IntentOutcome, IntentStatus, OrderResult, OrderStatus,
    PaymentGateway, PaymentIntentResult, PaymentStatus, ProviderRequest,
};
use donation_bridge::webhooks::{WebhookDelivery, WebhookEvent};

pub const STUB_INTENT_ID: &str = "pi_stub_1";
pub const STUB_CLIENT_SECRET: &str = "pi_stub_1_secret_abc";
pub const STUB_ORDER_ID: &str = "5O190127TN364715T";
pub const STUB_CAPTURE_ID: &str = "3C679366HH908993F";

pub struct StubGateway {
    provider: Provider,
    failure: Option<GatewayError>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl StubGateway {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            failure: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails with a provider API error carrying `message`
    pub fn failing(provider: Provider, status: u16, message: &str) -> Self {
        Self {
            failure: Some(GatewayError::new(
                provider,
                GatewayErrorKind::Api { status },
                message,
            )),
            ..Self::new(provider)
        }
    }

    /// Handle on the recorded create requests
    pub fn requests(&self) -> Arc<Mutex<Vec<ProviderRequest>>> {
        self.requests.clone()
    }

    fn fail(&self) -> Result<(), GatewayError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_intent(&self, request: ProviderRequest) -> Result<IntentOutcome, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.fail()?;

        match request {
            ProviderRequest::Stripe(stripe) => Ok(IntentOutcome::Intent(PaymentIntentResult {
                provider_intent_id: STUB_INTENT_ID.to_string(),
                client_secret: Some(STUB_CLIENT_SECRET.to_string()),
                status: IntentStatus::RequiresAction,
                amount: stripe.amount,
                currency: stripe.currency,
            })),
            ProviderRequest::PayPal(_) => Ok(IntentOutcome::Order(OrderResult {
                order_id: STUB_ORDER_ID.to_string(),
                status: OrderStatus::Created,
                payer_id: None,
                links: vec![LinkDescription {
                    href: format!("https://www.sandbox.paypal.com/checkoutnow?token={}", STUB_ORDER_ID),
                    rel: "payer-action".to_string(),
                    method: Some("GET".to_string()),
                }],
                raw: json!({"id": STUB_ORDER_ID, "status": "PAYER_ACTION_REQUIRED"}),
            })),
        }
    }

    async fn capture_or_fetch(
        &self,
        id: &str,
        payer_id: Option<&str>,
    ) -> Result<CaptureResult, GatewayError> {
        self.fail()?;

        Ok(CaptureResult {
            reference_id: id.to_string(),
            transaction_id: Some(STUB_CAPTURE_ID.to_string()),
            status: PaymentStatus::Completed,
            provider_status: "COMPLETED".to_string(),
            payer_id: payer_id.map(String::from),
            amount: Some("25.00".to_string()),
            currency: Some("USD".to_string()),
            raw: json!({"id": id, "status": "COMPLETED"}),
        })
    }

    async fn get_status(&self, id: &str) -> Result<IntentOutcome, GatewayError> {
        self.fail()?;

        Ok(IntentOutcome::Order(OrderResult {
            order_id: id.to_string(),
            status: OrderStatus::Approved,
            payer_id: Some("FSMVU44LF3YUS".to_string()),
            links: vec![],
            raw: json!({"id": id, "status": "APPROVED", "intent": "CAPTURE"}),
        }))
    }

    async fn verify_webhook(&self, _delivery: &WebhookDelivery) -> Result<WebhookEvent, SignatureError> {
        Err(SignatureError::Mismatch)
    }

    fn provider(&self) -> Provider {
        self.provider
    }
}

/// Registry with a healthy stub for both providers
pub fn stub_gateways() -> GatewayService {
    GatewayService::new(Duration::from_secs(5))
        .with_gateway(Arc::new(StubGateway::new(Provider::Stripe)))
        .with_gateway(Arc::new(StubGateway::new(Provider::PayPal)))
}
