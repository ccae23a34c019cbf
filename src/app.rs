use actix_web::web;
use std::sync::Arc;

use crate::config::Config;
use crate::core::Result;
use crate::middleware::json_config;
use crate::modules::donations::{DonationService, IntentRequestBuilder};
use crate::modules::gateways::GatewayService;
use crate::modules::webhooks::WebhookHandler;

/// Shared, read-only state handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub config: web::Data<Config>,
    pub gateways: web::Data<GatewayService>,
    pub donations: web::Data<DonationService>,
    pub webhooks: web::Data<WebhookHandler>,
}

impl AppState {
    /// Build the state with real provider clients
    pub fn from_config(config: Config) -> Result<Self> {
        let gateways = GatewayService::from_config(&config)?;
        Ok(Self::new(config, gateways))
    }

    /// Build the state around an already populated gateway registry
    pub fn new(config: Config, gateways: GatewayService) -> Self {
        let gateways = Arc::new(gateways);
        let builder = IntentRequestBuilder::new(&config.app);

        Self {
            donations: web::Data::new(DonationService::new(builder, gateways.clone())),
            webhooks: web::Data::new(WebhookHandler::new(gateways.clone())),
            gateways: web::Data::from(gateways),
            config: web::Data::new(config),
        }
    }

    /// App data plus every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.config.clone())
            .app_data(self.gateways.clone())
            .app_data(self.donations.clone())
            .app_data(self.webhooks.clone())
            .app_data(json_config())
            .configure(crate::modules::configure);
    }
}
