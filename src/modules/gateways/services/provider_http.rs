use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::{GatewayError, GatewayErrorKind, Provider};

/// Joins path segments onto a provider base URL, percent-encoding each one.
/// Caller-supplied ids go through here so they can never escape their segment.
pub fn endpoint(provider: Provider, base_url: &str, segments: &[&str]) -> Result<Url, GatewayError> {
    let mut url = Url::parse(base_url).map_err(|e| {
        GatewayError::new(
            provider,
            GatewayErrorKind::InvalidRequest,
            format!("Invalid {} base URL: {}", provider.display_name(), e),
        )
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            GatewayError::new(
                provider,
                GatewayErrorKind::InvalidRequest,
                format!("{} base URL cannot carry a path", provider.display_name()),
            )
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Reads a provider response, turning non-2xx answers into `GatewayError::Api`
/// with the provider's own message.
pub async fn read_json<T: DeserializeOwned>(
    provider: Provider,
    response: Response,
) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GatewayError::from_transport(provider, e))?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| error_message(provider, &v))
            .unwrap_or_else(|| {
                format!(
                    "{} API error - HTTP {} ({})",
                    provider.display_name(),
                    status.as_u16(),
                    body
                )
            });
        return Err(GatewayError::new(
            provider,
            GatewayErrorKind::Api {
                status: status.as_u16(),
            },
            message,
        ));
    }

    serde_json::from_str(&body).map_err(|e| GatewayError::decode(provider, e))
}

/// Pulls the human-readable message out of a provider error body
fn error_message(provider: Provider, body: &Value) -> Option<String> {
    match provider {
        // {"error": {"message": "...", "type": "card_error"}}
        Provider::Stripe => body["error"]["message"].as_str().map(String::from),
        // {"name": "...", "message": "...", "details": [{"description": "..."}]}
        // or the OAuth form {"error": "...", "error_description": "..."}
        Provider::PayPal => {
            let message = body["message"]
                .as_str()
                .or_else(|| body["error_description"].as_str())?;
            match body["details"][0]["description"].as_str() {
                Some(detail) => Some(format!("{} {}", message, detail)),
                None => Some(message.to_string()),
            }
        }
    }
}
