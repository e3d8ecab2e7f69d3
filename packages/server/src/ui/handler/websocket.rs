//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::Uri,
    response::Response,
};
use futures_util::{Stream, StreamExt, future, stream::SplitStream};

use crate::{
    domain::{ConnectionSink, RelayMessage, RoomId, TransportError},
    infrastructure::{dto::websocket::SocketMessage, transport::WebSocketSink},
    ui::state::AppState,
    usecase::{InboundReader, JoinRoomUseCase, LeaveRoomUseCase},
};

const ROOM_PREFIX: &str = "/ws/";

/// `GET /ws/` and `GET /ws/{*room_id}`: everything after `/ws/` is the room.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Response {
    upgrade(ws, state, room_from_path(uri.path()))
}

/// Percent-decode the path after `/ws/`. Bytes that are not UTF-8 become
/// U+FFFD instead of rejecting the request.
fn room_from_path(path: &str) -> RoomId {
    let raw = path.strip_prefix(ROOM_PREFIX).unwrap_or_default();
    let decoded = urlencoding::decode_binary(raw.as_bytes());
    RoomId::from(String::from_utf8_lossy(&decoded).into_owned())
}

/// Accept the upgrade regardless of `Origin`.
fn upgrade(ws: WebSocketUpgrade, state: Arc<AppState>, room: RoomId) -> Response {
    ws.on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state, room))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room: RoomId) {
    let (sender, receiver) = socket.split();

    // The handler owns the sink; the registry only sees a weak reference.
    let sink = Arc::new(WebSocketSink::new(sender));
    let shared: Arc<dyn ConnectionSink> = sink.clone();

    let connection_id = JoinRoomUseCase::new(state.registry.clone())
        .execute(room.clone(), &shared)
        .await;
    tracing::info!("Connection '{}' joined room '{}'", connection_id, room);

    let reader = InboundReader::new(
        connection_id,
        room.clone(),
        state.registry.clone(),
        state.queue.clone(),
    );
    let exit = reader.run(decode_frames(receiver)).await;

    let leave = LeaveRoomUseCase::new(state.registry.clone());
    leave.execute(&connection_id).await;
    sink.close().await;
    tracing::info!(
        "Connection '{}' left room '{}' ({:?}), {} connection(s) remaining",
        connection_id,
        room,
        exit,
        leave.count_remaining_connections().await
    );
}

/// Turn raw frames into relay messages for the inbound reader.
fn decode_frames(
    receiver: SplitStream<WebSocket>,
) -> impl Stream<Item = Result<RelayMessage, TransportError>> + Unpin + Send {
    receiver.filter_map(|frame| future::ready(decode_frame(frame)))
}

fn decode_frame(
    frame: Result<Message, axum::Error>,
) -> Option<Result<RelayMessage, TransportError>> {
    match frame {
        Ok(Message::Text(text)) => Some(SocketMessage::decode(text.as_str().as_bytes())),
        Ok(Message::Binary(bytes)) => Some(SocketMessage::decode(&bytes[..])),
        Ok(Message::Close(_)) => Some(Err(TransportError::Closed)),
        // Ping/pong is handled automatically by the WebSocket protocol
        Ok(Message::Ping(_) | Message::Pong(_)) => None,
        Err(e) => Some(Err(TransportError::Read(e.to_string()))),
    }
}
