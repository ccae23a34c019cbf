use serde::{Deserialize, Serialize};

/// Stripe payment intent as the bridge reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResult {
    pub provider_intent_id: String,
    pub client_secret: Option<String>,
    pub status: IntentStatus,
    /// Echoed amount in minor units
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresAction,
    Succeeded,
    Failed,
    Pending,
}

impl IntentStatus {
    /// Collapse Stripe's intent lifecycle onto the four reported states
    pub fn from_stripe(status: &str) -> Self {
        match status {
            "succeeded" => IntentStatus::Succeeded,
            "canceled" => IntentStatus::Failed,
            "requires_payment_method" | "requires_confirmation" | "requires_action"
            | "requires_capture" => IntentStatus::RequiresAction,
            _ => IntentStatus::Pending,
        }
    }
}

/// PayPal checkout order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: String,
    pub status: OrderStatus,
    pub payer_id: Option<String>,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
    /// Order JSON exactly as PayPal returned it
    #[serde(default)]
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Created,
    Approved,
    Completed,
    Denied,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Denied => "DENIED",
        }
    }

    pub fn from_paypal(status: &str) -> Self {
        match status {
            "APPROVED" => OrderStatus::Approved,
            "COMPLETED" => OrderStatus::Completed,
            "DENIED" | "VOIDED" | "DECLINED" | "FAILED" => OrderStatus::Denied,
            // CREATED, SAVED, PAYER_ACTION_REQUIRED
            _ => OrderStatus::Created,
        }
    }
}

/// HATEOAS link returned by PayPal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescription {
    pub href: String,
    pub rel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Result of `create_intent` / `get_status`
#[derive(Debug, Clone)]
pub enum IntentOutcome {
    Intent(PaymentIntentResult),
    Order(OrderResult),
}

/// Coarse payment state after a capture or fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    RequiresAction,
}

impl From<IntentStatus> for PaymentStatus {
    fn from(status: IntentStatus) -> Self {
        match status {
            IntentStatus::Succeeded => PaymentStatus::Completed,
            IntentStatus::Failed => PaymentStatus::Failed,
            IntentStatus::RequiresAction => PaymentStatus::RequiresAction,
            IntentStatus::Pending => PaymentStatus::Pending,
        }
    }
}

impl From<OrderStatus> for PaymentStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Completed => PaymentStatus::Completed,
            OrderStatus::Denied => PaymentStatus::Failed,
            OrderStatus::Approved => PaymentStatus::Pending,
            OrderStatus::Created => PaymentStatus::RequiresAction,
        }
    }
}

/// Result of `capture_or_fetch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureResult {
    /// Order id (PayPal) or payment intent id (Stripe)
    pub reference_id: String,
    /// Capture id (PayPal) or latest charge id (Stripe)
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    /// Status string verbatim from the provider
    pub provider_status: String,
    pub payer_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    #[serde(default)]
    pub raw: serde_json::Value,
}
