//! Websocket Signal Server
//!
//! Accepts connections from the chat gateway, reads raw signal text and feeds
//! it to a single worker. Connections are read concurrently, but only the
//! worker touches the exchange, one message at a time.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::application::ports::SessionFactory;
use crate::application::use_cases::SignalExecutor;
use crate::observability::record_signal_report;

/// Signal server error.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Socket error after binding.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Websocket server feeding a single signal worker.
pub struct SignalServer {
    listener: TcpListener,
    queue_capacity: usize,
}

impl SignalServer {
    /// Bind to `addr` (`host:port`, port 0 picks a free port).
    pub async fn bind(addr: &str, queue_capacity: usize) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self {
            listener,
            queue_capacity: queue_capacity.max(1),
        })
    }

    /// Address actually bound.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` is cancelled.
    ///
    /// The message being executed when shutdown arrives runs to completion;
    /// messages still queued are dropped.
    pub async fn run<F>(
        self,
        executor: Arc<SignalExecutor<F>>,
        shutdown: CancellationToken,
    ) -> Result<(), ServerError>
    where
        F: SessionFactory + 'static,
    {
        let addr = self.local_addr()?;
        let (tx, rx) = mpsc::channel::<String>(self.queue_capacity);
        let worker = spawn_worker(executor, rx, shutdown.clone());

        tracing::info!(%addr, "Signal server listening");

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::info!("Signal server shutting down");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            tokio::spawn(handle_connection(
                                stream,
                                peer,
                                tx.clone(),
                                shutdown.clone(),
                            ));
                        }
                        Err(e) => tracing::warn!(error = %e, "Failed to accept connection"),
                    }
                }
            }
        }

        drop(tx);
        if let Err(e) = worker.await {
            tracing::error!(error = %e, "Signal worker panicked");
        }
        Ok(())
    }
}

fn spawn_worker<F>(
    executor: Arc<SignalExecutor<F>>,
    mut rx: mpsc::Receiver<String>,
    shutdown: CancellationToken,
) -> JoinHandle<()>
where
    F: SessionFactory + 'static,
{
    tokio::spawn(async move {
        loop {
            let text = tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                next = rx.recv() => match next {
                    Some(text) => text,
                    None => break,
                },
            };

            let started = Instant::now();
            let report = executor.handle(&text).await;
            record_signal_report(&report, started.elapsed().as_secs_f64());
        }
        tracing::debug!("Signal worker stopped");
    })
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    queue: mpsc::Sender<String>,
    shutdown: CancellationToken,
) {
    let ws = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!(%peer, error = %e, "Websocket handshake failed");
            return;
        }
    };
    tracing::debug!(%peer, "Gateway connected");

    let (mut write, mut read) = ws.split();

    loop {
        let msg = tokio::select! {
            () = shutdown.cancelled() => break,
            msg = read.next() => msg,
        };

        match msg {
            Some(Ok(Message::Ping(data))) => {
                if let Err(e) = write.send(Message::Pong(data)).await {
                    tracing::debug!(%peer, error = %e, "Pong failed");
                    break;
                }
            }
            Some(Ok(Message::Close(_))) | None => break,
            Some(Ok(frame)) => {
                let Some(text) = frame_text(&frame) else {
                    continue;
                };
                tracing::info!(%peer, text = %text, "FROM TG");
                if queue.send(text).await.is_err() {
                    tracing::warn!(%peer, "Signal worker gone, dropping connection");
                    break;
                }
            }
            Some(Err(e)) => {
                tracing::warn!(%peer, error = %e, "Websocket read error");
                break;
            }
        }
    }

    tracing::debug!(%peer, "Gateway disconnected");
}

/// Trimmed text of a data frame. Non-UTF-8 binary and empty frames yield `None`.
fn frame_text(frame: &Message) -> Option<String> {
    let raw = match frame {
        Message::Text(text) => text.as_str(),
        Message::Binary(data) => std::str::from_utf8(data).ok()?,
        _ => return None,
    };
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
