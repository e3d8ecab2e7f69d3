//! Core domain models for the relay.

use super::value_object::RoomId;

/// Room that receives out-of-band signals pushed over HTTP.
pub const SIGNAL_ROOM: &str = "ws";

/// A message travelling through the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage {
    /// Message body
    pub text: String,
    /// Room the message was relayed from, if any
    pub room_id: Option<RoomId>,
}

impl RelayMessage {
    /// Create a message with no room attached
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            room_id: None,
        }
    }

    /// Replace whatever room the client claimed with the sender's room.
    pub fn stamped(self, room: &RoomId) -> Self {
        Self {
            text: self.text,
            room_id: Some(room.clone()),
        }
    }
}

/// One unit of work for the broadcaster: a message and the room it fans out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Connections registered under this room receive the message
    pub target: RoomId,
    /// Message written to each recipient
    pub message: RelayMessage,
}

impl Delivery {
    /// Relay a message read from a connection in `room` back to that room.
    pub fn relay(room: &RoomId, message: RelayMessage) -> Self {
        Self {
            target: room.clone(),
            message: message.stamped(room),
        }
    }

    /// Push a bare value to every connection in the signal room.
    pub fn signal(value: impl Into<String>) -> Self {
        Self {
            target: RoomId::new(SIGNAL_ROOM),
            message: RelayMessage::new(value),
        }
    }
}
