//! Domain layer error definitions.

use thiserror::Error;

/// Errors raised by a connection's transport.
///
/// Every variant ends the connection that produced it and nothing else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The connection was closed (by the peer or by us)
    #[error("connection closed")]
    Closed,

    /// Reading the next frame failed
    #[error("read failed: {0}")]
    Read(String),

    /// Writing a frame failed
    #[error("write failed: {0}")]
    Write(String),

    /// An inbound frame was not a valid relay message
    #[error("malformed message: {0}")]
    Decode(String),

    /// An outbound message could not be serialized
    #[error("failed to encode message: {0}")]
    Encode(String),
}
