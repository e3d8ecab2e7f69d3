//! HTTP API endpoint handlers.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use heya_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    infrastructure::dto::http::{ApiResponse, HealthDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::{SignalError, SignalRoomUseCase},
};

type ApiReply = (StatusCode, Json<ApiResponse>);

fn reply(status: StatusCode, message: impl Into<String>) -> ApiReply {
    (status, Json(ApiResponse::new(status.as_u16(), message)))
}

/// Split the part of the path after `/r/` into `(mode, value)` at its last
/// `/`. A leading `/` does not count as a separator.
pub fn split_api_path(path: &str) -> (&str, &str) {
    match (path.find('/'), path.rfind('/')) {
        (Some(first), Some(last)) if first > 0 => (&path[..last], &path[last + 1..]),
        _ => (path, ""),
    }
}

/// `GET /r/{*request}`
pub async fn api_handler(
    State(state): State<Arc<AppState>>,
    Path(request): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiReply {
    match split_api_path(&request) {
        ("time", value) => {
            let usecase = SignalRoomUseCase::new(state.queue.clone());
            match usecase.execute(value).await {
                Ok(()) => reply(StatusCode::OK, "ok"),
                Err(SignalError::MissingValue) => reply(StatusCode::BAD_REQUEST, "missing value"),
                Err(e @ SignalError::QueueClosed(_)) => {
                    tracing::error!("Failed to queue signal: {}", e);
                    reply(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
                }
            }
        }
        ("ip", _) => match params.get("ip") {
            Some(ip) => {
                tracing::info!("ip: {}", ip);
                reply(StatusCode::OK, ip.clone())
            }
            None => reply(StatusCode::BAD_REQUEST, "missing ip"),
        },
        (mode, _) => {
            tracing::debug!("Unknown API mode '{}'", mode);
            reply(StatusCode::NOT_FOUND, "unknown mode")
        }
    }
}

/// `GET /r/` with nothing after the prefix
pub async fn api_root() -> ApiReply {
    reply(StatusCode::NOT_FOUND, "unknown mode")
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        connections: state.registry.count().await,
    })
}

/// Get list of rooms that currently have connections
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state
        .registry
        .occupancy()
        .await
        .into_iter()
        .map(|room| RoomSummaryDto {
            room_id: room.room.into_string(),
            connections: room.connections,
            since: timestamp_to_jst_rfc3339(room.since.value()),
        })
        .collect();

    Json(rooms)
}
