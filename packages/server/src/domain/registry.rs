//! Connection registry abstraction.
//!
//! The use cases depend on this trait; the in-memory implementation lives in
//! the infrastructure layer.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ConnectionId, ConnectionSink, RoomId, Timestamp};

/// A live connection selected for one fan-out round.
#[derive(Clone)]
pub struct Recipient {
    pub id: ConnectionId,
    pub sink: Arc<dyn ConnectionSink>,
}

/// How many connections a room currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOccupancy {
    pub room: RoomId,
    pub connections: usize,
    /// Earliest `connected_at` among the room's connections
    pub since: Timestamp,
}

/// Mapping from live connection to its room.
///
/// Implementations must make every operation mutually exclusive with every
/// other one.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Associate `id` with `room`, replacing any previous association.
    ///
    /// The registry keeps only a weak reference to `sink`; the caller owns the
    /// connection.
    async fn register(
        &self,
        id: ConnectionId,
        room: RoomId,
        sink: &Arc<dyn ConnectionSink>,
        connected_at: Timestamp,
    );

    /// Remove `id`. Returns the room it was in, or `None` if it was not
    /// registered.
    async fn unregister(&self, id: &ConnectionId) -> Option<RoomId>;

    /// Snapshot of the live connections registered under `room`.
    async fn recipients(&self, room: &RoomId) -> Vec<Recipient>;

    /// Room a connection is registered under.
    async fn room_of(&self, id: &ConnectionId) -> Option<RoomId>;

    /// Number of registered connections.
    async fn count(&self) -> usize;

    /// Per-room connection counts, sorted by room.
    async fn occupancy(&self) -> Vec<RoomOccupancy>;
}
