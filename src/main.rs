//! QuickPaste server entrypoint.

use std::sync::Arc;
use std::time::Duration;

use quickpaste::{
    config::Config, db::Database, models::paste::now_ms, resolve_bind_address, serve_router,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quickpaste=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.contains(&"--help".to_string()) {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    let database = Database::new(&config.db_path)?;
    let state = AppState::new(config.clone(), database);

    spawn_expiry_sweep(state.db.clone(), config.sweep_interval);

    let bind_addr = resolve_bind_address(&config);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("QuickPaste running at http://{}", bind_addr);

    let db = state.db.clone();
    serve_router(listener, state, shutdown_signal(db)).await?;

    Ok(())
}

/// Best-effort stand-in for a provider-managed TTL: periodically remove
/// records whose deadline has passed. The lazy check on read stays
/// authoritative, so a missed sweep only costs storage, not correctness.
fn spawn_expiry_sweep(db: Arc<Database>, interval_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            match db.pastes.sweep_expired(now_ms()) {
                Ok(0) => {}
                Ok(n) => tracing::info!("Expiry sweep removed {} paste(s)", n),
                Err(err) => tracing::warn!("Expiry sweep failed: {}", err),
            }
        }
    });
}

fn print_help() {
    println!("QuickPaste Server\n");
    println!("Usage: quickpaste [OPTIONS]\n");
    println!("Options:");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  DB_PATH              Database path (default: ./data/quickpaste.db)");
    println!("  PORT                 Server port (default: 8080)");
    println!("  MAX_PASTE_SIZE       Maximum paste size in bytes (default: 1MB)");
    println!("  PUBLIC_URL           Base URL used in create responses");
    println!("  SWEEP_INTERVAL_SECS  Seconds between expired-paste sweeps (default: 3600)");
    println!("  BIND                 Override bind address (e.g. 0.0.0.0:8080)");
}

async fn shutdown_signal(db: Arc<Database>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");

    if let Err(err) = db.flush() {
        tracing::error!("Failed to flush database: {}", err);
    } else {
        tracing::info!("Database flushed successfully");
    }
}
