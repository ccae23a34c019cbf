pub mod gateway_service;
pub mod gateway_trait;
pub mod paypal;
pub mod provider_http;
pub mod stripe;

pub use gateway_service::GatewayService;
pub use gateway_trait::{PayPalOrderRequest, PaymentGateway, ProviderRequest, StripeIntentRequest};
pub use paypal::PayPalClient;
pub use stripe::StripeClient;
