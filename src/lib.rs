//! Donation payment bridge
//!
//! Accepts donation requests from web and mobile clients, creates Stripe
//! payment intents and PayPal orders, and acknowledges provider webhooks.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use app::AppState;
pub use modules::donations;
pub use modules::gateways;
pub use modules::webhooks;
