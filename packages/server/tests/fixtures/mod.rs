//! Shared fixtures for integration tests.
//!
//! Each test starts its own server on an ephemeral port so tests can run in
//! parallel.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use heya_server::{App, ServerConfig, create_app, domain::ConnectionRegistry, ui::state::AppState};
use serde_json::Value;
use tokio::{
    net::{TcpListener, TcpStream},
    task::JoinHandle,
    time::{Instant, sleep, timeout},
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// How long a client must stay silent for "receives nothing" assertions
pub const SILENCE: Duration = Duration::from_millis(300);

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TestServer {
    addr: SocketAddr,
    pub state: Arc<AppState>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    /// Start with `config`; the host and port are replaced by the test listener's.
    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let config = ServerConfig {
            host: addr.ip().to_string(),
            port: addr.port(),
            ..config
        };

        let App { router, state } = create_app(&config);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, room: &str) -> String {
        format!("ws://{}/ws/{}", self.addr, room)
    }

    /// Open a WebSocket to `room` and wait until the server has registered it.
    pub async fn join(&self, room: &str) -> WsStream {
        let before = self.state.registry.count().await;
        let (ws, _response) = timeout(TIMEOUT, connect_async(self.ws_url(room)))
            .await
            .expect("Timed out connecting")
            .expect("Failed to connect");
        self.wait_for_connections(before + 1).await;
        ws
    }

    /// Poll the registry until it holds exactly `expected` connections.
    pub async fn wait_for_connections(&self, expected: usize) {
        let deadline = Instant::now() + TIMEOUT;
        loop {
            let count = self.state.registry.count().await;
            if count == expected {
                return;
            }
            assert!(
                Instant::now() < deadline,
                "expected {} connections, registry has {}",
                expected,
                count
            );
            sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn send_json(ws: &mut WsStream, value: Value) {
    ws.send(Message::text(value.to_string()))
        .await
        .expect("Failed to send");
}

/// Next text frame as JSON.
pub async fn recv_json(ws: &mut WsStream) -> Value {
    let deadline = Instant::now() + TIMEOUT;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let frame = timeout(remaining, ws.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Connection ended")
            .expect("WebSocket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Invalid JSON from server");
        }
    }
}

/// Assert that no text frame arrives for [`SILENCE`].
pub async fn assert_silent(ws: &mut WsStream) {
    if let Ok(Some(Ok(Message::Text(text)))) = timeout(SILENCE, ws.next()).await {
        panic!("expected no message, got {}", text.as_str());
    }
}

/// True once the server has closed the connection.
pub async fn wait_for_close(ws: &mut WsStream) -> bool {
    let deadline = Instant::now() + TIMEOUT;
    while Instant::now() < deadline {
        match timeout(TIMEOUT, ws.next()).await {
            Ok(None) | Ok(Some(Err(_))) | Ok(Some(Ok(Message::Close(_)))) => return true,
            Ok(Some(Ok(_))) => continue,
            Err(_) => return false,
        }
    }
    false
}
