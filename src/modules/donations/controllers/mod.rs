use actix_web::{http::header, HttpRequest};

pub mod paypal_controller;
pub mod stripe_controller;

/// `Origin` request header, if present and readable
fn origin_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
}
