//! WebSocket message DTOs for the relay.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{RelayMessage, RoomId, TransportError};

/// Wire format of a relayed message, in both directions.
///
/// Clients may omit `room_id` (or send anything there); the server replaces it
/// with the sender's room before relaying. Signals carry no `room_id` at all.
/// A missing or `null` message is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketMessage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SocketMessage {
    /// Decode one inbound frame.
    pub fn decode(payload: &[u8]) -> Result<RelayMessage, TransportError> {
        serde_json::from_slice::<SocketMessage>(payload)
            .map(RelayMessage::from)
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Encode an outbound message as a JSON text payload.
    pub fn encode(message: &RelayMessage) -> Result<String, TransportError> {
        serde_json::to_string(&SocketMessage::from(message))
            .map_err(|e| TransportError::Encode(e.to_string()))
    }
}

impl From<SocketMessage> for RelayMessage {
    fn from(dto: SocketMessage) -> Self {
        Self {
            text: dto.message,
            room_id: dto.room_id.map(RoomId::from),
        }
    }
}

impl From<&RelayMessage> for SocketMessage {
    fn from(message: &RelayMessage) -> Self {
        Self {
            message: message.text.clone(),
            room_id: message.room_id.as_ref().map(|room| room.as_str().to_string()),
        }
    }
}
