use crate::core::{AppError, Result};
use crate::modules::gateways::GatewayEnvironment;
use crate::modules::webhooks::services::DEFAULT_TOLERANCE_SECS;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration, built once at startup and shared read-only
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub stripe: StripeConfig,
    pub paypal: PayPalConfig,
    pub gateway: GatewayCallConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    /// Value of the fixed `app` metadata key
    pub slug: String,
    /// Shown on the PayPal checkout page
    pub brand_name: String,
    /// PayPal purchase unit description
    pub donation_description: String,
    /// Base for the PayPal return/cancel URLs
    pub frontend_url: String,
    pub log_format: LogFormat,
    /// Empty means any origin
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    pub secret_key: String,
    pub webhook_secret: Option<String>,
    pub base_url: String,
    pub webhook_tolerance_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayPalConfig {
    /// `None` when either PAYPAL_CLIENT_ID or PAYPAL_CLIENT_SECRET is missing
    pub credentials: Option<PayPalCredentials>,
    pub webhook_id: Option<String>,
    pub base_url: String,
    pub environment: GatewayEnvironment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayPalCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayCallConfig {
    /// Deadline applied to every provider call
    pub timeout_secs: u64,
}

impl LogFormat {
    /// `LOG_FORMAT=json` selects JSON lines, anything else the pretty format
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

impl StripeConfig {
    /// LIVE for `sk_live_` keys, TEST otherwise
    pub fn mode(&self) -> &'static str {
        if self.secret_key.starts_with("sk_live_") {
            "LIVE"
        } else {
            "TEST"
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let app_env = env::var("APP_ENV")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".to_string());
        let environment = if app_env.eq_ignore_ascii_case("production") {
            GatewayEnvironment::Production
        } else {
            GatewayEnvironment::Sandbox
        };

        let log_format = LogFormat::from_env();

        let credentials = match (env::var("PAYPAL_CLIENT_ID"), env::var("PAYPAL_CLIENT_SECRET")) {
            (Ok(client_id), Ok(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Some(PayPalCredentials {
                    client_id,
                    client_secret,
                })
            }
            _ => None,
        };

        let config = Config {
            app: AppConfig {
                env: app_env,
                slug: var_or("APP_SLUG", "shavahn-bible"),
                brand_name: var_or("APP_BRAND_NAME", "Shavahn Bible App"),
                donation_description: var_or(
                    "APP_DONATION_DESCRIPTION",
                    "Donation to Shavahn Bible App Ministry",
                ),
                frontend_url: var_or("FRONTEND_URL", "http://localhost:3000"),
                log_format,
                cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|v| {
                        v.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            server: ServerConfig::from_env()?,
            stripe: StripeConfig {
                secret_key: env::var("STRIPE_SECRET_KEY")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| {
                        AppError::Configuration("STRIPE_SECRET_KEY not set".to_string())
                    })?,
                webhook_secret: env::var("STRIPE_WEBHOOK_SECRET")
                    .ok()
                    .filter(|v| !v.is_empty()),
                base_url: var_or("STRIPE_BASE_URL", "https://api.stripe.com"),
                webhook_tolerance_secs: parse_var(
                    "STRIPE_WEBHOOK_TOLERANCE_SECS",
                    DEFAULT_TOLERANCE_SECS,
                )?,
            },
            paypal: PayPalConfig {
                credentials,
                webhook_id: env::var("PAYPAL_WEBHOOK_ID").ok().filter(|v| !v.is_empty()),
                base_url: env::var("PAYPAL_BASE_URL")
                    .unwrap_or_else(|_| environment.paypal_base_url().to_string()),
                environment,
            },
            gateway: GatewayCallConfig {
                timeout_secs: parse_var("GATEWAY_TIMEOUT_SECS", 30)?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.gateway.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Gateway timeout must be greater than 0".to_string(),
            ));
        }

        if self.stripe.webhook_tolerance_secs <= 0 {
            return Err(AppError::Configuration(
                "Stripe webhook tolerance must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "Port must be greater than 0".to_string(),
            ));
        }

        if reqwest::Url::parse(&self.app.frontend_url).is_err() {
            return Err(AppError::Configuration(format!(
                "Invalid FRONTEND_URL: {}",
                self.app.frontend_url
            )));
        }

        Ok(())
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
