use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use food_donation_dashboard::{
    config::Config,
    controller::Controller,
    handlers::{AppState, create_router},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "food_donation_dashboard=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!("Loading datasets from {}", config.data_dir.display());

    let controller = Arc::new(Controller::start(config).context("Failed to load datasets")?);
    let addr = controller.config().server_addr();
    let app = create_router(AppState::new(controller));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
