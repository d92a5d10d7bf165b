//! Signal Executor Binary
//!
//! Serves one venue: receives chat signals over a local websocket and places
//! the resulting orders on Bybit.
//!
//! # Usage
//!
//! ```bash
//! SIGNAL_VENUE=futures cargo run --bin signal-executor
//! ```
//!
//! # Environment Variables
//!
//! ## Credentials (a missing pair fails every signal, not startup)
//! - `BYBIT_API_KEY`: API key
//! - `BYBIT_API_SECRET`: API secret
//!
//! ## Optional
//! - `SIGNAL_VENUE`: spot | futures (default: spot)
//! - `BYBIT_DEMO`: true | false (default: true)
//! - `TRADE_AMOUNT_USD`: notional per symbol (default: 5)
//! - `LEVERAGE`: futures leverage (default: 5)
//! - `TAKE_PROFIT_PCT`: take-profit offset as a fraction (default: 0.15)
//! - `QUOTE_ASSET`: quote asset (default: USDT)
//! - `BYBIT_RECV_WINDOW_MS`, `BYBIT_TIMEOUT_SECS`, `BYBIT_BASE_URL`
//! - `SIGNAL_WS_HOST` (default: 127.0.0.1), `SIGNAL_WS_PORT` (default: 8765 spot, 8766 futures)
//! - `SIGNAL_QUEUE_CAPACITY` (default: 64)
//! - `SIGNAL_METRICS_PORT`: Prometheus exporter port, 0 disables (default: 0)
//! - `RUST_LOG`: Log level (default: signal_executor=info)

use std::sync::Arc;

use signal_executor::infrastructure::config::ExecutorConfig;
use signal_executor::infrastructure::exchange::BybitSessionFactory;
use signal_executor::infrastructure::websocket::SignalServer;
use signal_executor::observability::{MetricsConfig, init_metrics};
use signal_executor::telemetry::init_telemetry;
use signal_executor::SignalExecutor;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    let telemetry = init_telemetry();

    let config = ExecutorConfig::from_env()?;
    log_config(&config);
    if telemetry.is_exporting() {
        tracing::info!("Exporting spans over OTLP");
    }

    if config.server.metrics_port != 0 {
        if let Err(e) = init_metrics(&MetricsConfig::with_port(config.server.metrics_port)) {
            tracing::warn!(error = %e, "Metrics exporter not started, continuing without it");
        }
    }

    let factory = BybitSessionFactory::new(config.bybit_config());
    let executor = Arc::new(SignalExecutor::new(
        factory,
        config.venue,
        config.execution_settings(),
    ));

    let server =
        SignalServer::bind(&config.server.listen_addr(), config.server.queue_capacity).await?;

    let shutdown_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown_token.clone()));

    tracing::info!(venue = %config.venue, "Signal executor ready");

    server.run(executor, shutdown_token).await?;

    tracing::info!("Signal executor stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &ExecutorConfig) {
    tracing::info!(
        venue = %config.venue,
        environment = %config.environment,
        notional = %config.trade.notional,
        leverage = config.trade.leverage,
        take_profit_pct = %config.trade.take_profit_pct,
        quote_asset = %config.trade.quote_asset,
        listen = %config.server.listen_addr(),
        "Configuration loaded"
    );

    if !config.credentials.is_complete() {
        tracing::warn!("BYBIT_API_KEY / BYBIT_API_SECRET not set, every signal will be abandoned");
    }
    if config.environment.is_live() {
        tracing::warn!("LIVE trading enabled - orders will use real funds");
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT), then cancel `token`.
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    token.cancel();
}
