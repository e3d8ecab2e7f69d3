//! Room-based WebSocket message relay.
//!
//! Clients connect to `/ws/<room>` and every JSON message they send is
//! relayed to all connections in the same room. A single broadcaster task
//! performs all fan-out; a mutex-guarded registry tracks which connection is
//! in which room.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{App, create_app, run as run_server};
