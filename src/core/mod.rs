pub mod currency;
pub mod error;
pub mod provider;

pub use currency::CurrencyCode;
pub use error::{AppError, GatewayError, GatewayErrorKind, Result, SignatureError, ValidationError};
pub use provider::Provider;
