pub mod gateway_config;
pub mod payment;

pub use gateway_config::GatewayEnvironment;
pub use payment::{
    CaptureResult, IntentOutcome, IntentStatus, LinkDescription, OrderResult, OrderStatus,
    PaymentIntentResult, PaymentStatus,
};
