use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::amount_validator::AmountValidator;
use super::request_builder::IntentRequestBuilder;
use crate::core::{AppError, GatewayError, GatewayErrorKind, Provider, Result};
use crate::modules::donations::models::{
    CreateOrderResponse, DonationRequest, ExecutePaymentRequest, ExecutePaymentResponse,
    PaymentIntentResponse,
};
use crate::modules::gateways::{GatewayService, IntentOutcome, PaymentStatus, ProviderRequest};

/// Donation flows: validate, build, then one provider call
pub struct DonationService {
    validator: AmountValidator,
    builder: IntentRequestBuilder,
    gateways: Arc<GatewayService>,
}

impl DonationService {
    pub fn new(builder: IntentRequestBuilder, gateways: Arc<GatewayService>) -> Self {
        Self {
            validator: AmountValidator::new(),
            builder,
            gateways,
        }
    }

    /// Create a Stripe payment intent for the donation
    pub async fn create_stripe_intent(
        &self,
        request: &DonationRequest,
        origin: Option<&str>,
    ) -> Result<PaymentIntentResponse> {
        let provider_request = self.prepare(request, origin, Provider::Stripe)?;
        if let ProviderRequest::Stripe(stripe) = &provider_request {
            info!(
                amount = stripe.amount,
                currency = %stripe.currency,
                origin = origin.unwrap_or("unknown"),
                "Creating payment intent"
            );
        }

        let intent = match self.gateways.create_intent(provider_request).await? {
            IntentOutcome::Intent(intent) => intent,
            IntentOutcome::Order(_) => return Err(unexpected_outcome(Provider::Stripe).into()),
        };

        let client_secret = intent.client_secret.ok_or_else(|| {
            GatewayError::decode(Provider::Stripe, "payment intent has no client_secret")
        })?;

        Ok(PaymentIntentResponse {
            client_secret,
            payment_intent_id: intent.provider_intent_id,
        })
    }

    /// Create a PayPal checkout order for the donation
    pub async fn create_paypal_order(
        &self,
        request: &DonationRequest,
        origin: Option<&str>,
    ) -> Result<CreateOrderResponse> {
        let provider_request = self.prepare(request, origin, Provider::PayPal)?;
        let (amount, currency) = match &provider_request {
            ProviderRequest::PayPal(paypal) => (paypal.value.clone(), paypal.currency.clone()),
            ProviderRequest::Stripe(_) => return Err(unexpected_outcome(Provider::PayPal).into()),
        };
        info!(
            amount = %amount,
            currency = %currency,
            metadata = ?provider_request.metadata(),
            "Creating PayPal order"
        );

        let order = match self.gateways.create_intent(provider_request).await? {
            IntentOutcome::Order(order) => order,
            IntentOutcome::Intent(_) => return Err(unexpected_outcome(Provider::PayPal).into()),
        };

        info!(order_id = %order.order_id, status = ?order.status, "PayPal order created");

        Ok(CreateOrderResponse {
            id: order.order_id.clone(),
            order_id: order.order_id,
            // PayPal's own status string, e.g. PAYER_ACTION_REQUIRED
            status: order
                .raw
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or(order.status.as_str())
                .to_string(),
            links: order.links,
            amount,
            currency,
        })
    }

    /// Capture an approved PayPal order
    pub async fn execute_paypal_payment(
        &self,
        request: &ExecutePaymentRequest,
    ) -> Result<ExecutePaymentResponse> {
        let payment_id = request
            .payment_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::missing_field("Payment ID is required"))?;

        info!(payment_id = %payment_id, "Executing PayPal payment");

        let capture = self
            .gateways
            .capture_or_fetch(Provider::PayPal, payment_id, request.payer_id.as_deref())
            .await?;

        info!(
            payment_id = %capture.reference_id,
            status = %capture.provider_status,
            "PayPal payment captured"
        );

        Ok(ExecutePaymentResponse {
            success: capture.status == PaymentStatus::Completed,
            transaction_id: capture
                .transaction_id
                .unwrap_or_else(|| capture.reference_id.clone()),
            payment_id: capture.reference_id,
            status: capture.provider_status,
            payer: capture.payer_id,
            amount: capture.amount,
            currency: capture.currency,
        })
    }

    /// Raw PayPal order JSON
    pub async fn get_paypal_order(&self, order_id: &str) -> Result<Value> {
        match self.gateways.get_status(Provider::PayPal, order_id).await? {
            IntentOutcome::Order(order) => Ok(order.raw),
            IntentOutcome::Intent(_) => Err(unexpected_outcome(Provider::PayPal).into()),
        }
    }

    fn prepare(
        &self,
        request: &DonationRequest,
        origin: Option<&str>,
        provider: Provider,
    ) -> Result<ProviderRequest> {
        let amount = self.validator.validate(request.amount.as_ref(), provider)?;
        let provider_request = self.builder.build(
            amount,
            request.currency.as_deref(),
            request.metadata.as_ref(),
            origin,
        )?;
        Ok(provider_request)
    }
}

fn unexpected_outcome(provider: Provider) -> GatewayError {
    GatewayError::new(
        provider,
        GatewayErrorKind::Decode,
        format!("{} returned an unexpected result type", provider.display_name()),
    )
}
