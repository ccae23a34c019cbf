use actix_web::{web, HttpRequest, HttpResponse};

use super::origin_header;
use crate::core::Result;
use crate::modules::donations::models::DonationRequest;
use crate::modules::donations::services::DonationService;

/// Create a Stripe payment intent for a donation
/// POST /create-payment-intent
/// POST /api/stripe/payment-intent
pub async fn create_payment_intent(
    req: HttpRequest,
    service: web::Data<DonationService>,
    request: web::Json<DonationRequest>,
) -> Result<HttpResponse> {
    let response = service
        .create_stripe_intent(&request, origin_header(&req))
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Configure Stripe donation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-payment-intent", web::post().to(create_payment_intent))
        .route("/api/stripe/payment-intent", web::post().to(create_payment_intent));
}
