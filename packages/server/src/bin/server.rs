//! Room-based WebSocket relay server.
//!
//! Relays messages between clients connected to the same `/ws/<room>`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin heya-server -- [PORT]
//! ```

use heya_server::ServerConfig;
use heya_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Run the server
    if let Err(e) = heya_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
