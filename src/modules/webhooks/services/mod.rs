pub mod event_mapper;
pub mod stripe_signature;
pub mod webhook_handler;

pub use event_mapper::{map_event_type, paypal_event, stripe_event};
pub use stripe_signature::{SignatureHeader, StripeSignatureVerifier, DEFAULT_TOLERANCE_SECS};
pub use webhook_handler::WebhookHandler;
