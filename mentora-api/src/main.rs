use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use mentora_api::{app, app_config::Config, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        environment = %config.environment,
        "Starting Mentora API on port {}",
        config.server.port
    );

    let host: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server.host {:?}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));

    let app = app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received, draining connections...");
        })
        .await?;

    Ok(())
}
