//! Test doubles shared by unit tests across layers.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionSink, RelayMessage, TransportError};

/// Sink that records every message written to it.
#[derive(Default)]
pub struct RecordingSink {
    received: Mutex<Vec<RelayMessage>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A fresh sink already erased to the trait object the registry expects.
    pub fn shared() -> Arc<dyn ConnectionSink> {
        Self::new()
    }

    pub async fn received(&self) -> Vec<RelayMessage> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl ConnectionSink for RecordingSink {
    async fn send(&self, message: &RelayMessage) -> Result<(), TransportError> {
        self.received.lock().await.push(message.clone());
        Ok(())
    }

    async fn close(&self) {}
}
