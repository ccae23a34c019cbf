pub mod amount_validator;
pub mod donation_service;
pub mod request_builder;

pub use amount_validator::AmountValidator;
pub use donation_service::DonationService;
pub use request_builder::IntentRequestBuilder;
