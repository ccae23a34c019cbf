use actix_web::web;

pub mod donations;
pub mod gateways;
pub mod health;
pub mod webhooks;

/// Register every module's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(donations::controllers::stripe_controller::configure)
        .configure(donations::controllers::paypal_controller::configure)
        .configure(webhooks::controllers::webhook_controller::configure);
}
