pub mod controllers;
pub mod models;
pub mod services;

pub use models::{WebhookDelivery, WebhookEvent, WebhookEventKind};
pub use services::WebhookHandler;
