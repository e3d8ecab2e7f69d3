//! `ConnectionSink` over the write half of an axum WebSocket.

use std::{
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, stream::SplitSink};
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionSink, RelayMessage, TransportError},
    infrastructure::dto::websocket::SocketMessage,
};

/// Write half of one WebSocket connection.
///
/// Both the broadcaster (after a failed write) and the connection handler
/// (when the reader ends) close the sink; only the first close reaches the
/// socket.
pub struct WebSocketSink<S = SplitSink<WebSocket, Message>> {
    sink: Mutex<S>,
    closed: AtomicBool,
}

impl<S> WebSocketSink<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink: Mutex::new(sink),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl<S> ConnectionSink for WebSocketSink<S>
where
    S: Sink<Message> + Send + Unpin + 'static,
    S::Error: Display + Send,
{
    async fn send(&self, message: &RelayMessage) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        let json = SocketMessage::encode(message)?;
        let mut sink = self.sink.lock().await;
        sink.send(Message::Text(json.into()))
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut sink = self.sink.lock().await;
        if let Err(e) = sink.close().await {
            tracing::debug!("Error while closing WebSocket: {}", e);
        }
    }
}
