//! POS API server entry point.

use anyhow::Context;
use axum::http::HeaderValue;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use vendo_api::config::Config;
use vendo_api::{create_app, AppState};
use vendo_db::{Database, DbConfig};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env (if present) and initialize tracing
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Open the database (runs migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let state = AppState { db };

    // 4. Build the application
    let allowed_origin: HeaderValue = config
        .allowed_origin
        .parse()
        .with_context(|| format!("invalid ALLOWED_ORIGIN: {}", config.allowed_origin))?;
    let app = create_app(state, allowed_origin);

    // 5. Start the server
    let addr = config.addr();
    tracing::info!(%addr, "starting POS API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server shut down gracefully");
    Ok(())
}
