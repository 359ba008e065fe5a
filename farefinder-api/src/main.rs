use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use farefinder_api::{app, cors_layer, AppState};
use farefinder_core::{AirportDirectory, FlightProvider, HubRegistry};
use farefinder_infra::{AmadeusClient, Config};
use farefinder_routes::RouteOptimizer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "farefinder_api=debug,farefinder_routes=debug,farefinder_infra=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        "Starting farefinder v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let airports = Arc::new(AirportDirectory::load(
        config.airports.csv_path.as_deref().map(Path::new),
    ));

    let provider: Arc<dyn FlightProvider> = Arc::new(
        AmadeusClient::new(&config.provider).context("Failed to build provider client")?,
    );
    let optimizer = RouteOptimizer::new(provider.clone(), Arc::new(HubRegistry::default()));

    let state = AppState::new(provider.clone(), optimizer, airports, config.environment.clone())
        .with_code_validation(config.airports.validate_codes);

    // Connectivity probe once the listener is up; failures are not fatal.
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        tracing::info!("Testing flight provider connection...");
        match provider.health_check().await {
            Ok(()) => tracing::info!("Flight provider connection successful"),
            Err(e) => tracing::warn!(
                "Flight provider connection failed, searches may not work: {}",
                e
            ),
        }
    });

    let app = app(state, cors_layer(&config.server.allowed_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down server...");
}
