//! Signal Gateway Binary
//!
//! Relays chat signals from a Telegram bot to the spot and futures executors.
//!
//! # Usage
//!
//! ```bash
//! TELEGRAM_BOT_TOKEN=... cargo run --bin signal-gateway
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `TELEGRAM_BOT_TOKEN`: Bot token
//!
//! ## Optional
//! - `SPOT_WS_URL`: spot executor (default: ws://localhost:8765)
//! - `FUTURES_WS_URL`: futures executor (default: ws://localhost:8766)
//! - `TELEGRAM_POLL_TIMEOUT_SECS`: long-poll timeout (default: 30)
//! - `TELEGRAM_API_URL`: Bot API base URL (default: https://api.telegram.org)
//! - `RUST_LOG`: Log level (default: signal_gateway=info)

use signal_gateway::infrastructure::config::GatewayConfig;
use signal_gateway::infrastructure::relay::WsSignalSink;
use signal_gateway::infrastructure::telegram::TelegramClient;
use signal_gateway::infrastructure::telemetry;
use signal_gateway::GatewayService;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // wss:// executor URLs need a process-wide provider.
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("rustls crypto provider already installed");
    }

    load_dotenv();
    telemetry::init();

    tracing::info!("Starting signal gateway");

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        api_url = %config.telegram.api_url,
        poll_timeout_secs = config.telegram.poll_timeout.as_secs(),
        spot = %config.targets.spot_url,
        futures = %config.targets.futures_url,
        "Configuration loaded"
    );

    let chat = TelegramClient::new(&config.telegram)?;
    let sink = WsSignalSink::new(config.targets.clone());
    let mut service = GatewayService::new(chat, sink, config.targets);

    let shutdown_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown_token.clone()));

    service.run(shutdown_token).await;

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

/// Wait for SIGTERM or SIGINT, then cancel `token`.
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
        () = ctrl_c => tracing::info!("Received Ctrl+C, stopping"),
        () = terminate => tracing::info!("Received SIGTERM, stopping"),
    }

    token.cancel();
}
