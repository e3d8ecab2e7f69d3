//! Domain layer for the relay server.
//!
//! Room and connection identities, the relayed message model, and the traits
//! the use cases depend on. Nothing here knows about axum or JSON.

pub mod connection;
pub mod entity;
pub mod error;
pub mod factory;
pub mod registry;
pub mod value_object;

pub use connection::ConnectionSink;
#[cfg(test)]
pub use connection::MockConnectionSink;
pub use entity::{Delivery, RelayMessage, SIGNAL_ROOM};
pub use error::TransportError;
pub use factory::ConnectionIdFactory;
pub use registry::{ConnectionRegistry, Recipient, RoomOccupancy};
pub use value_object::{ConnectionId, RoomId, Timestamp};
