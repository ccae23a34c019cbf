use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::Config;
use crate::modules::gateways::GatewayService;

/// Public routes, as listed by `GET /` and the 404 handler
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("health", "GET /health"),
    ("stripe", "POST /create-payment-intent"),
    ("stripe_alt", "POST /api/stripe/payment-intent"),
    ("stripe_webhook", "POST /webhook"),
    ("paypal_create", "POST /api/paypal/create-order"),
    ("paypal_execute", "POST /api/paypal/execute-payment"),
    ("paypal_order", "GET /api/paypal/order/:orderId"),
    ("paypal_webhook", "POST /api/paypal/webhook"),
    ("test", "GET /test"),
];

/// Route list in `METHOD /path` form
pub fn available_endpoints() -> Vec<&'static str> {
    ENDPOINTS.iter().map(|(_, route)| *route).collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
    pub timestamp: String,
    pub cors: String,
    pub stripe_mode: String,
    pub endpoints: BTreeMap<String, String>,
}

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub providers: Vec<String>,
}

/// GET / - Service status and route directory
pub async fn index(config: web::Data<Config>) -> impl Responder {
    let response = StatusResponse {
        message: format!("{} donation server is running!", config.app.brand_name),
        status: "running".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        cors: "enabled".to_string(),
        stripe_mode: config.stripe.mode().to_string(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(name, route)| (name.to_string(), route.to_string()))
            .collect(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /health - Liveness probe
/// Does not call the providers
pub async fn health_check(gateways: web::Data<GatewayService>) -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        providers: gateways
            .providers()
            .into_iter()
            .map(|p| p.to_string())
            .collect(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /test - Echo request headers and peer address for network debugging
pub async fn echo(req: HttpRequest) -> impl Responder {
    let headers: BTreeMap<String, String> = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Test endpoint working",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "headers": headers,
        "ip": ip,
        "cors": "enabled",
    }))
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/test", web::get().to(echo));
}
