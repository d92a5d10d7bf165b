//! Relay Forwarding Integration Tests
//!
//! The gateway against a `wiremock` Bot API and two local websocket
//! executors.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use futures_util::StreamExt;
use serde_json::{Value, json};
use signal_gateway::{
    ChatError, ChatPort, GatewayService, RouteTargets, TelegramClient, TelegramConfig,
    WsSignalSink,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

/// Websocket server standing in for an executor. Yields every text frame.
async fn executor_stub() -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(stream).await else {
                    return;
                };
                while let Some(Ok(frame)) = ws.next().await {
                    if let Message::Text(text) = frame {
                        let _ = tx.send(text.as_str().to_string());
                    }
                }
            });
        }
    });

    (url, rx)
}

/// A URL nothing listens on.
async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

fn client(server: &MockServer) -> TelegramClient {
    let config = TelegramConfig::new(TOKEN)
        .with_api_url(server.uri())
        .with_poll_timeout(Duration::ZERO);
    TelegramClient::new(&config).unwrap()
}

fn gateway(
    server: &MockServer,
    targets: RouteTargets,
) -> GatewayService<TelegramClient, WsSignalSink> {
    let sink = WsSignalSink::new(targets.clone()).with_connect_timeout(Duration::from_secs(2));
    GatewayService::new(client(server), sink, targets)
}

fn updates(items: &[(i64, i64, &str)]) -> ResponseTemplate {
    let result: Vec<Value> = items
        .iter()
        .map(|(update_id, chat_id, text)| {
            json!({
                "update_id": update_id,
                "message": {
                    "message_id": update_id,
                    "date": 1_700_000_000,
                    "chat": {"id": chat_id, "type": "private"},
                    "text": text
                }
            })
        })
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": result}))
}

async fn mount_send_message(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "result": {"message_id": 99}})),
        )
        .mount(server)
        .await;
}

async fn sent_texts(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path().ends_with("/sendMessage"))
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["text"].as_str().unwrap().to_string()
        })
        .collect()
}

async fn next_frame(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("executor received nothing")
        .unwrap()
}

#[tokio::test]
async fn signal_is_forwarded_to_spot_and_acknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(updates(&[(5, 42, "  #ETH bullish ")]))
        .mount(&server)
        .await;
    mount_send_message(&server).await;

    let (spot_url, mut spot_rx) = executor_stub().await;
    let (futures_url, mut futures_rx) = executor_stub().await;
    let mut gw = gateway(&server, RouteTargets::new(spot_url, futures_url));

    let next = gw.poll_once(None).await.unwrap();

    assert_eq!(next, Some(6));
    assert_eq!(next_frame(&mut spot_rx).await, "#ETH bullish");
    assert!(futures_rx.try_recv().is_err());
    assert_eq!(sent_texts(&server).await, vec!["Signal sent to SPOT bot."]);
}

#[tokio::test]
async fn futures_command_reroutes_following_signals() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(updates(&[(7, 42, "/futures"), (8, 42, "Short #ETH #BTC")]))
        .mount(&server)
        .await;
    mount_send_message(&server).await;

    let (spot_url, mut spot_rx) = executor_stub().await;
    let (futures_url, mut futures_rx) = executor_stub().await;
    let mut gw = gateway(&server, RouteTargets::new(spot_url, futures_url.clone()));

    let next = gw.poll_once(Some(7)).await.unwrap();

    assert_eq!(next, Some(9));
    assert_eq!(next_frame(&mut futures_rx).await, "Short #ETH #BTC");
    assert!(spot_rx.try_recv().is_err());
    assert_eq!(
        sent_texts(&server).await,
        vec![
            format!("Mode: FUTURES\nWebSocket: {futures_url}"),
            "Signal sent to FUTURES bot.".to_string(),
        ]
    );
}

#[tokio::test]
async fn unreachable_executor_is_reported_to_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(updates(&[(1, 42, "#SOL bullish")]))
        .mount(&server)
        .await;
    mount_send_message(&server).await;

    let targets = RouteTargets::new(dead_url().await, dead_url().await);
    let mut gw = gateway(&server, targets);

    gw.poll_once(None).await.unwrap();

    let texts = sent_texts(&server).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Failed to send signal to SPOT bot"));
}

#[tokio::test]
async fn skip_pending_starts_after_last_queued_update() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .and(body_partial_json(json!({"offset": -1, "timeout": 0})))
        .respond_with(updates(&[(41, 42, "old signal")]))
        .expect(1)
        .mount(&server)
        .await;

    let offset = client(&server).skip_pending().await.unwrap();
    assert_eq!(offset, Some(42));
}

#[tokio::test]
async fn api_error_envelope_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let err = client(&server).poll(None).await.unwrap_err();
    assert_eq!(
        err,
        ChatError::Rejected {
            code: 401,
            description: "Unauthorized".to_string(),
        }
    );
}
