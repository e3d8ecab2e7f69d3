//! WebSocket relay server: router, handlers, and process lifecycle.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{App, create_app, run};
