use actix_web::{web, App, HttpServer};
use anyhow::Context;
use donation_bridge::config::{Config, LogFormat};
use donation_bridge::middleware::{cors_policy, not_found, ErrorLogger, RequestId};
use donation_bridge::AppState;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading LOG_FORMAT
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());

    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting {} donation server", config.app.brand_name);
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Stripe mode: {}", config.stripe.mode());
    tracing::info!("PayPal environment: {}", config.paypal.environment);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let cors_origins = config.app.cors_allowed_origins.clone();
    let state = AppState::from_config(config).context("Failed to build payment gateways")?;

    let mut server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(ErrorLogger)
            .wrap(RequestId)
            .wrap(cors_policy(&cors_origins))
            .configure(move |cfg| state.configure(cfg))
            .default_service(web::to(not_found))
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "donation_bridge=debug,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}
