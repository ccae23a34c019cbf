use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

use super::provider::Provider;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Client input rejected before any provider call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Provider-side failure, message passed through to the caller
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Webhook forgery or corruption
    #[error("Webhook Error: {0}")]
    Signature(#[from] SignatureError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Donation input errors, all mapped to 400
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Absent, null or non-numeric amount; carries the provider's minimum message
    #[error("{message}")]
    Missing { provider: Provider, message: String },

    #[error("{message}")]
    BelowMinimum { provider: Provider, message: String },

    #[error("{message}")]
    AboveMaximum { provider: Provider, message: String },

    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    #[error("{0}")]
    MissingField(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Failure class of a provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Per-call deadline expired
    Timeout,
    /// Connection or request could not be completed
    Transport,
    /// Provider answered with a non-success HTTP status
    Api { status: u16 },
    /// Provider answered with a body we could not read
    Decode,
    /// Provider credentials are absent from the configuration
    NotConfigured,
    /// Request built for a different provider
    InvalidRequest,
}

/// Provider-side failure, never retried
#[derive(thiserror::Error, Debug, Clone)]
#[error("{message}")]
pub struct GatewayError {
    pub provider: Provider,
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(provider: Provider, kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(provider: Provider, seconds: u64) -> Self {
        Self::new(
            provider,
            GatewayErrorKind::Timeout,
            format!("{} request timed out after {}s", provider.display_name(), seconds),
        )
    }

    pub fn decode(provider: Provider, err: impl std::fmt::Display) -> Self {
        Self::new(
            provider,
            GatewayErrorKind::Decode,
            format!("Failed to parse {} response: {}", provider.display_name(), err),
        )
    }

    /// Classify a reqwest failure the way the deadline contract expects
    pub fn from_transport(provider: Provider, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::new(
                provider,
                GatewayErrorKind::Timeout,
                format!("{} request timed out: {}", provider.display_name(), err),
            );
        }
        Self::new(
            provider,
            GatewayErrorKind::Transport,
            format!("{} API request failed: {}", provider.display_name(), err),
        )
    }

    /// `type` field of the JSON error envelope
    pub fn error_type(&self) -> &'static str {
        match self.provider {
            Provider::Stripe => "stripe_error",
            Provider::PayPal => "paypal_error",
        }
    }
}

/// Webhook signature verification failures. Processing stops on any of them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("No signatures found matching the expected signature for payload")]
    Mismatch,

    #[error("Missing {0} header")]
    MissingHeader(&'static str),

    #[error("Unable to extract timestamp and signatures from header")]
    MalformedHeader,

    #[error("Timestamp outside the tolerance zone")]
    TimestampOutOfRange,

    #[error("Webhook secret is not configured")]
    SecretNotConfigured,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Provider rejected the webhook signature ({0})")]
    Rejected(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        match self {
            // Stripe's reference handler answers signature failures in plain text
            AppError::Signature(_) => HttpResponse::build(status_code)
                .content_type("text/plain; charset=utf-8")
                .body(self.to_string()),
            AppError::Gateway(err) => HttpResponse::build(status_code).json(serde_json::json!({
                "error": err.message,
                "type": err.error_type(),
            })),
            _ => HttpResponse::build(status_code).json(serde_json::json!({
                "error": self.to_string(),
            })),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Signature(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    pub fn missing_field(msg: impl Into<String>) -> Self {
        AppError::Validation(ValidationError::MissingField(msg.into()))
    }
}
