//! The write side of a live connection, as seen by the broadcaster.

use async_trait::async_trait;

use super::{RelayMessage, error::TransportError};

/// Outbound half of a connection.
///
/// Only the broadcaster writes through this trait, so writes to one
/// connection never interleave.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionSink: Send + Sync {
    /// Write one message to the peer.
    async fn send(&self, message: &RelayMessage) -> Result<(), TransportError>;

    /// Close the transport. Calls after the first are no-ops.
    async fn close(&self);
}
