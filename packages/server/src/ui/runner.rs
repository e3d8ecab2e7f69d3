//! Router assembly and the server entry point.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    error::ServerError,
    infrastructure::registry::InMemoryConnectionRegistry,
    ui::{handler, signal::shutdown_signal, state::AppState},
    usecase::{BroadcastQueue, Broadcaster},
};

/// A router together with the state behind it.
pub struct App {
    pub router: Router,
    pub state: Arc<AppState>,
}

/// Build the shared state, spawn the broadcaster task, and assemble the router.
///
/// `/test` and `/old` serve their pages from the template directory; any other
/// unmatched path gets the index page.
///
/// Must be called from within a tokio runtime.
pub fn create_app(config: &ServerConfig) -> App {
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let (queue, receiver) = BroadcastQueue::channel(config.queue_capacity);
    tokio::spawn(Broadcaster::new(registry.clone(), receiver).run());

    let state = Arc::new(AppState { registry, queue });

    let router = Router::new()
        .route("/ws/", get(handler::websocket_handler))
        .route("/ws/{*room_id}", get(handler::websocket_handler))
        .route("/r/", get(handler::api_root))
        .route("/r/{*request}", get(handler::api_handler))
        .route("/api/health", get(handler::health_check))
        .route("/api/rooms", get(handler::get_rooms))
        .nest_service("/st", ServeDir::new(&config.static_dir))
        .route_service("/test", ServeFile::new(config.template_dir.join("test.html")))
        .route_service("/old", ServeFile::new(config.template_dir.join("index_old.html")))
        .fallback_service(ServeFile::new(config.template_dir.join("index.html")))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    App { router, state }
}

/// Bind, serve, and return when the server fails or a shutdown signal
/// arrives. Open connections are not drained.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Listening on {}", addr);

    let app = create_app(&config);

    tokio::select! {
        result = axum::serve(listener, app.router).into_future() => {
            result.map_err(ServerError::Serve)
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            Ok(())
        }
    }
}
