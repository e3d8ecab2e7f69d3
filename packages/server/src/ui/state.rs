//! Server state shared by every handler.

use std::sync::Arc;

use crate::{domain::ConnectionRegistry, usecase::BroadcastQueue};

/// Shared application state
pub struct AppState {
    /// Registry（データアクセス層の抽象化）
    pub registry: Arc<dyn ConnectionRegistry>,
    /// Input queue of the broadcaster task
    pub queue: BroadcastQueue,
}
