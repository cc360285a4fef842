//! Textdedup Server
//!
//! A self-hosted deduplication service for textual documents. Users register,
//! log in, and upload text/PDF/Word files; the server fingerprints the
//! whitespace-normalized text and classifies each upload against the
//! session's history, recording original hashes in an append-only ledger.

use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textdedup_server::config::Config;
use textdedup_server::db::{self, UserRepository};
use textdedup_server::session::SessionManager;
use textdedup_server::state::AppState;
use textdedup_server::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textdedup_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting Textdedup Server v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the credential store
    let db_pool = db::create_pool(&config.database.url).await?;
    let user_count = UserRepository::new(&db_pool).count().await?;
    tracing::info!(
        url = %config.database.url,
        users = user_count,
        "Credential store initialized"
    );

    // Session registry with background expiry sweep
    let sessions = SessionManager::new();
    sessions.clone().start_cleanup_task();

    let state = AppState::new(config.clone(), db_pool, sessions);
    let app = app(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Textdedup Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
