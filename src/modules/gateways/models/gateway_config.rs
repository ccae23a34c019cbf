use serde::{Deserialize, Serialize};

/// Which provider environment the credentials belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    Sandbox,
    Production,
}

impl GatewayEnvironment {
    pub fn paypal_base_url(&self) -> &'static str {
        match self {
            GatewayEnvironment::Sandbox => "https://api-m.sandbox.paypal.com",
            GatewayEnvironment::Production => "https://api-m.paypal.com",
        }
    }
}

impl std::fmt::Display for GatewayEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayEnvironment::Sandbox => write!(f, "sandbox"),
            GatewayEnvironment::Production => write!(f, "production"),
        }
    }
}
