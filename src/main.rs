//! Entry point: load config, wire dependencies, and run the server.

use credgate::auth::{Argon2Hasher, CredentialStore};
use credgate::config::Config;
use credgate::db;
use credgate::services::{MemorySessionStore, SessionService};
use credgate::{create_app, AppState};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.has_weak_secret() {
        tracing::warn!("SECRET_KEY is the dev default or too short; sessions are forgeable");
    }

    let db_pool = db::create_pool(&config.sqlite_path).await?;
    let hasher = Argon2Hasher::new(config.hash_cost)?;
    let credentials = CredentialStore::new(db_pool.clone(), hasher).await?;
    let sessions = SessionService::new(
        Arc::new(MemorySessionStore::new()),
        &config.secret_key,
        chrono::Duration::seconds(config.session_ttl_secs),
    );
    let sweeper = sessions.spawn_sweeper(SWEEP_INTERVAL);

    let state = AppState {
        credentials,
        sessions,
        secure_cookies: config.environment.is_production(),
    };
    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, db = %config.sqlite_path, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    db_pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
