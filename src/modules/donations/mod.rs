pub mod controllers;
pub mod models;
pub mod services;

pub use models::{DonationRequest, ExecutePaymentRequest, ValidatedAmount};
pub use services::{AmountValidator, DonationService, IntentRequestBuilder};
