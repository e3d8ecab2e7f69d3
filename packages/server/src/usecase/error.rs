//! UseCase layer error definitions.

use thiserror::Error;

/// The broadcaster has stopped and no longer accepts deliveries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("broadcast queue is closed")]
pub struct QueueClosed;

/// Errors from pushing an out-of-band signal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("signal value cannot be empty")]
    MissingValue,

    #[error(transparent)]
    QueueClosed(#[from] QueueClosed),
}
