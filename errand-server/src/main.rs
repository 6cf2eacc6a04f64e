//! errand-server — Campus errand marketplace backend
//!
//! Long-running HTTP service that:
//! - Manages users, errand orders, and rider settings (JWT authenticated)
//! - Auto-assigns pending orders to riders under per-rider rate limits
//!   (row-locked claim transaction, at most one rider per order)
//! - Maintains rider wallets with an append-only transaction ledger
//! - Receives payment confirmations via an idempotent webhook

use errand_server::{AppState, Config, api};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "errand_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting errand-server (env: {})", config.environment);

    // Initialize application state (connects to Postgres, runs migrations)
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("errand-server listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
