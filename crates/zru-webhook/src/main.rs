use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zru_webhook::config::WebhookConfig;
use zru_webhook::routes;
use zru_webhook::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match WebhookConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}. Set it to the secret key of the ZRU account sending notifications.");
            std::process::exit(1);
        }
    };

    if config.metrics_token.is_none() && config.public_metrics {
        tracing::warn!("ZRU_PUBLIC_METRICS=true, /metrics is served without authentication");
    }

    let port = config.port;
    let rate_limit_rpm = config.rate_limit_rpm;
    let state = web::Data::new(AppState::from_config(&config));

    tracing::info!("ZRU webhook receiver listening on port {port}");
    tracing::info!("Rate limit: {rate_limit_rpm} req/min per IP");
    tracing::info!("  POST http://localhost:{port}/notifications");

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm)
        .finish()
        .expect("failed to build rate limiter config");

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(65_536))
            .service(routes::health)
            .service(routes::metrics_endpoint)
            .service(routes::receive_notification)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
