use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::JsonPayloadError,
    web, Error, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use super::request_id::RequestIdValue;
use crate::core::{AppError, ValidationError};
use crate::modules::health::available_endpoints;

/// Request bodies up to 10 MiB
pub const JSON_LIMIT: usize = 10 * 1024 * 1024;

/// Middleware that logs every error response a handler produced
pub struct ErrorLogger;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let request_id = req
            .extensions()
            .get::<RequestIdValue>()
            .map(|id| id.0.clone())
            .unwrap_or_default();

        Box::pin(async move {
            let result = service.call(req).await;

            match &result {
                Ok(res) => {
                    if let Some(err) = res.response().error() {
                        let status = res.status();
                        if status.is_server_error() {
                            tracing::error!(
                                request_id = %request_id,
                                status = %status,
                                error = %err,
                                "Request failed"
                            );
                        } else {
                            tracing::warn!(
                                request_id = %request_id,
                                status = %status,
                                error = %err,
                                "Request rejected"
                            );
                        }
                    }
                }
                Err(err) => tracing::error!(request_id = %request_id, "Request error: {:?}", err),
            }

            result
        })
    }
}

/// JSON extractor config: body limit and `{error}` envelope for unreadable bodies
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(json_error_handler)
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    AppError::Validation(ValidationError::InvalidBody(err.to_string())).into()
}

/// Default service: 404 with the list of routes we do serve
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    tracing::warn!(method = %req.method(), url = %req.uri(), "Endpoint not found");

    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Endpoint not found",
        "method": req.method().as_str(),
        "url": req.uri().to_string(),
        "available_endpoints": available_endpoints(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
