use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::config::AppConfig;
use crate::core::{CurrencyCode, ValidationError};
use crate::modules::donations::models::ValidatedAmount;
use crate::modules::gateways::{PayPalOrderRequest, ProviderRequest, StripeIntentRequest};

/// Turns a validated donation into the provider-specific create request
#[derive(Debug, Clone)]
pub struct IntentRequestBuilder {
    app_slug: String,
    brand_name: String,
    description: String,
    frontend_url: String,
}

impl IntentRequestBuilder {
    pub fn new(app: &AppConfig) -> Self {
        Self {
            app_slug: app.slug.clone(),
            brand_name: app.brand_name.clone(),
            description: app.donation_description.clone(),
            frontend_url: app.frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the create request for the provider the amount was validated for
    ///
    /// # Arguments
    /// * `amount` - validated amount; its variant selects the provider
    /// * `currency` - ISO-4217 code, provider default when absent
    /// * `metadata` - caller metadata, merged after the fixed keys
    /// * `origin` - request `Origin` header
    pub fn build(
        &self,
        amount: ValidatedAmount,
        currency: Option<&str>,
        metadata: Option<&Map<String, Value>>,
        origin: Option<&str>,
    ) -> Result<ProviderRequest, ValidationError> {
        let provider = amount.provider();
        let currency: CurrencyCode = currency
            .unwrap_or_else(|| provider.default_currency())
            .parse()?;
        let metadata = self.merge_metadata(metadata, origin);

        let request = match amount {
            ValidatedAmount::MinorUnits(amount) => ProviderRequest::Stripe(StripeIntentRequest {
                amount,
                currency: currency.to_stripe(),
                metadata,
                automatic_payment_methods: true,
            }),
            ValidatedAmount::MajorUnits(amount) => ProviderRequest::PayPal(PayPalOrderRequest {
                intent: "CAPTURE".to_string(),
                value: currency.format_value(amount),
                currency: currency.to_paypal(),
                description: self.description.clone(),
                return_url: format!("{}/paypal/success", self.frontend_url),
                cancel_url: format!("{}/paypal/cancel", self.frontend_url),
                brand_name: self.brand_name.clone(),
                user_action: "PAY_NOW".to_string(),
                metadata,
            }),
        };

        Ok(request)
    }

    /// Fixed keys first, caller keys after. A caller key replaces a fixed key
    /// of the same name.
    fn merge_metadata(
        &self,
        caller: Option<&Map<String, Value>>,
        origin: Option<&str>,
    ) -> BTreeMap<String, String> {
        let mut merged = BTreeMap::new();
        merged.insert("app".to_string(), self.app_slug.clone());
        merged.insert("type".to_string(), "donation".to_string());
        merged.insert(
            "origin".to_string(),
            origin.unwrap_or("unknown").to_string(),
        );

        for (key, value) in caller.into_iter().flatten() {
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };

            if let Some(previous) = merged.insert(key.clone(), value) {
                if matches!(key.as_str(), "app" | "type" | "origin") {
                    tracing::warn!(
                        key = %key,
                        replaced = %previous,
                        "Caller metadata overrides a fixed key"
                    );
                }
            }
        }

        merged
    }
}
