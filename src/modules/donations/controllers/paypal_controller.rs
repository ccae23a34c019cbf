use actix_web::{web, HttpRequest, HttpResponse};

use super::origin_header;
use crate::core::Result;
use crate::modules::donations::models::{DonationRequest, ExecutePaymentRequest};
use crate::modules::donations::services::DonationService;

/// Create a PayPal order for a donation
/// POST /api/paypal/create-order
pub async fn create_order(
    req: HttpRequest,
    service: web::Data<DonationService>,
    request: web::Json<DonationRequest>,
) -> Result<HttpResponse> {
    let response = service
        .create_paypal_order(&request, origin_header(&req))
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Capture an approved PayPal order
/// POST /api/paypal/execute-payment
pub async fn execute_payment(
    service: web::Data<DonationService>,
    request: web::Json<ExecutePaymentRequest>,
) -> Result<HttpResponse> {
    let response = service.execute_paypal_payment(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Get PayPal order details
/// GET /api/paypal/order/{orderId}
pub async fn get_order(
    service: web::Data<DonationService>,
    order_id: web::Path<String>,
) -> Result<HttpResponse> {
    let order = service.get_paypal_order(&order_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// Configure PayPal donation routes
///
/// Registered as full paths so `/api/paypal/webhook` can live in the webhooks module.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/paypal/create-order", web::post().to(create_order))
        .route("/api/paypal/execute-payment", web::post().to(execute_payment))
        .route("/api/paypal/order/{order_id}", web::get().to(get_order));
}
