//! Gateway Service
//!
//! Polls the chat API, answers commands and forwards every other text
//! message to the executor selected by the chat's current route.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{ChatError, ChatPort, SignalSink};
use crate::domain::chat::{ChatInput, ChatMessage, GatewayCommand};
use crate::domain::routing::{ChatId, Route, RouteTable, RouteTargets};

/// Pause after a failed poll before polling again.
const POLL_ERROR_DELAY: Duration = Duration::from_secs(3);

/// Reply to `/start`.
pub const HELP_TEXT: &str = "Hi! I am the signal gateway.\n\
/spot - send signals to the spot bot\n\
/futures - send signals to the futures bot\n\n\
Just write signals like '#ETH bullish' or 'Short #ETH #BTC' in this chat.";

/// What the gateway did with one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// No text, blank text or an unknown command.
    Ignored,
    /// Help sent.
    Help,
    /// Chat switched to a route.
    Switched(Route),
    /// Signal delivered.
    Forwarded(Route),
    /// Delivery failed; the chat was told.
    ForwardFailed(Route),
}

/// Chat-to-executor relay.
pub struct GatewayService<C, S> {
    chat: C,
    sink: S,
    targets: RouteTargets,
    routes: RouteTable,
}

impl<C: ChatPort, S: SignalSink> GatewayService<C, S> {
    /// Create a service. Every chat starts on the spot route.
    pub fn new(chat: C, sink: S, targets: RouteTargets) -> Self {
        Self {
            chat,
            sink,
            targets,
            routes: RouteTable::new(Route::Spot),
        }
    }

    /// Current routes.
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Handle one message, replying through the chat port.
    pub async fn handle(&mut self, message: &ChatMessage) -> HandleOutcome {
        let Some(text) = message.text.as_deref() else {
            return HandleOutcome::Ignored;
        };
        let chat_id = message.chat_id;

        match ChatInput::parse(text) {
            ChatInput::Ignore => HandleOutcome::Ignored,
            ChatInput::Command(GatewayCommand::Start) => {
                self.reply(chat_id, HELP_TEXT).await;
                HandleOutcome::Help
            }
            ChatInput::Command(GatewayCommand::Switch(route)) => {
                let previous = self.routes.switch(chat_id, route);
                let url = self.targets.url_for(route);
                tracing::info!(chat_id, from = %previous, to = %route, url, "Route switched");
                self.reply(chat_id, &format!("Mode: {route}\nWebSocket: {url}"))
                    .await;
                HandleOutcome::Switched(route)
            }
            ChatInput::Signal(signal) => {
                let route = self.routes.route_for(chat_id);
                match self.sink.forward(&signal, route).await {
                    Ok(()) => {
                        tracing::info!(chat_id, route = %route, signal = %signal, "Signal forwarded");
                        self.reply(chat_id, &format!("Signal sent to {route} bot."))
                            .await;
                        HandleOutcome::Forwarded(route)
                    }
                    Err(e) => {
                        tracing::error!(chat_id, route = %route, error = %e, "Signal not delivered");
                        self.reply(
                            chat_id,
                            &format!("Failed to send signal to {route} bot: {e}"),
                        )
                        .await;
                        HandleOutcome::ForwardFailed(route)
                    }
                }
            }
        }
    }

    /// Poll once and handle every message. Returns the offset for the next poll.
    pub async fn poll_once(&mut self, offset: Option<i64>) -> Result<Option<i64>, ChatError> {
        let messages = self.chat.poll(offset).await?;
        let mut next = offset;
        for message in &messages {
            self.handle(message).await;
            next = Some(next.map_or(message.update_id + 1, |n| n.max(message.update_id + 1)));
        }
        Ok(next)
    }

    /// Relay until `shutdown` is cancelled. Messages queued before startup are dropped.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        let mut offset = match self.chat.skip_pending().await {
            Ok(offset) => offset,
            Err(e) => {
                tracing::warn!(error = %e, "Could not drop pending updates");
                None
            }
        };
        tracing::info!("Gateway polling for messages");

        loop {
            let polled = tokio::select! {
                () = shutdown.cancelled() => break,
                polled = self.poll_once(offset) => polled,
            };

            match polled {
                Ok(next) => offset = next,
                Err(e) => {
                    tracing::warn!(error = %e, "Poll failed");
                    tokio::select! {
                        () = shutdown.cancelled() => break,
                        () = tokio::time::sleep(POLL_ERROR_DELAY) => {}
                    }
                }
            }
        }

        tracing::info!("Gateway stopped");
    }

    async fn reply(&self, chat_id: ChatId, text: &str) {
        if let Err(e) = self.chat.send_message(chat_id, text).await {
            tracing::warn!(chat_id, error = %e, "Reply not sent");
        }
    }
}
