//! Websocket Signal Relay
//!
//! Delivers signal text to the executors. One short-lived connection per
//! signal: connect, send a single text frame, close.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::SinkExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::application::ports::{RelayError, SignalSink};
use crate::domain::routing::{Route, RouteTargets};

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`SignalSink`] over websocket connections to the executors.
#[derive(Debug, Clone)]
pub struct WsSignalSink {
    targets: RouteTargets,
    connect_timeout: Duration,
}

impl WsSignalSink {
    /// Create a sink for `targets`.
    #[must_use]
    pub const fn new(targets: RouteTargets) -> Self {
        Self {
            targets,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Override the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[async_trait]
impl SignalSink for WsSignalSink {
    async fn forward(&self, text: &str, route: Route) -> Result<(), RelayError> {
        let url = self.targets.url_for(route);

        let (mut ws, _response) =
            match tokio::time::timeout(self.connect_timeout, connect_async(url)).await {
                Ok(Ok(connected)) => connected,
                Ok(Err(e)) => {
                    return Err(RelayError::Connect {
                        url: url.to_string(),
                        message: e.to_string(),
                    });
                }
                Err(_) => {
                    return Err(RelayError::Timeout {
                        url: url.to_string(),
                    });
                }
            };

        ws.send(Message::text(text))
            .await
            .map_err(|e| RelayError::Send {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if let Err(e) = ws.close(None).await {
            tracing::debug!(url, error = %e, "Close handshake failed after send");
        }

        tracing::debug!(url, route = %route, "Frame delivered");
        Ok(())
    }
}
