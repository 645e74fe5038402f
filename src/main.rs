use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use routecast::ai::AiClient;
use routecast::api::AppState;
use routecast::config::RoutecastConfig;
use routecast::estimator::Estimator;
use routecast::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RoutecastConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let ai = AiClient::from_config(&config.ai)?;
    if ai.is_none() {
        tracing::info!("Running without AI credential; estimates use tables and formula only");
    }

    let state = AppState {
        estimator: Arc::new(Estimator::new(ai.clone())),
        ai,
    };

    web::run(config.server.port, state).await
}
