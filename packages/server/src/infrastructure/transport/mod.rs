//! Transport adapters implementing the domain's `ConnectionSink`.

pub mod websocket;

pub use websocket::WebSocketSink;
