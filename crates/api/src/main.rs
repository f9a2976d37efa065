use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use garun_core::error::CoreError;
use garun_core::regulation::RegulationTable;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use garun_api::app::build_app;
use garun_api::config::ServerConfig;
use garun_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "garun_api=debug,garun_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Regulations ---
    let regulations = match &config.regulations_path {
        Some(path) => RegulationTable::from_path(path)?,
        None => RegulationTable::indore_2025(),
    };
    tracing::info!(
        city = ?regulations.city,
        zones = regulations.zones.len(),
        "Regulation table loaded"
    );

    // --- Store ---
    let pool = garun_db::create_pool();
    let stats = garun_db::health_check(&pool).await;
    tracing::info!(?stats, "Record store ready");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        regulations: Arc::new(regulations),
    };
    let app = build_app(state)?;

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .map_err(|_| CoreError::Configuration(format!("Invalid HOST address: {}", config.host)))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM (on Unix) to start graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
