use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use sheet_intake::config::Config;
use sheet_intake::sheets::range::a1_range;
use sheet_intake::sheets::SheetsClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real env vars win
    let _ = dotenvy::dotenv();

    let config = Config::from_env().expect("Failed to load configuration");

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!(
        "Starting sheet-intake: spreadsheet {} range {} ({})",
        config.sheet.spreadsheet_id,
        a1_range(&config.sheet.sheet_name, &config.sheet.range),
        config.sheet.value_input.as_str()
    );

    // Authorize against Google before accepting traffic
    let sheets = SheetsClient::connect(&config).await.map_err(|e| {
        tracing::error!("Google Sheets initialization failed: {e}");
        e
    })?;

    let addr = SocketAddr::new(config.host, config.port);
    let app = sheet_intake::build_app(config, Arc::new(sheets));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
