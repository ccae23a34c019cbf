pub mod models;
pub mod services;

pub use models::{
    CaptureResult, GatewayEnvironment, IntentOutcome, IntentStatus, OrderResult, OrderStatus,
    PaymentIntentResult, PaymentStatus,
};
pub use services::{
    GatewayService, PayPalClient, PayPalOrderRequest, PaymentGateway, ProviderRequest,
    StripeClient, StripeIntentRequest,
};
