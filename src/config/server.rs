use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Server configuration for HTTP server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// actix-web picks one worker per physical core when unset
    pub workers: Option<usize>,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            workers: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid PORT".to_string()))?;
        let workers = match env::var("SERVER_WORKERS") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|_| AppError::Configuration("Invalid SERVER_WORKERS".to_string()))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            workers,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
