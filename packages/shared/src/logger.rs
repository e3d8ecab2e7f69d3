//! Logger setup built on `tracing-subscriber`.

use std::fmt;

use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
};

use crate::time::now_jst;

/// Formats event timestamps in JST with millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct JstTimer;

impl FormatTime for JstTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", now_jst().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Build the default filter directive for a binary.
///
/// Cargo binary names use hyphens while tracing targets use the crate's
/// module path, so `heya-server` becomes `heya_server`.
pub fn default_directive(bin_name: &str, default_level: &str) -> String {
    format!(
        "{}={},tower_http=info",
        bin_name.replace('-', "_"),
        default_level
    )
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once is harmless; later calls are ignored.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, default_level)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(JstTimer)
        .with_target(true)
        .try_init();

    if result.is_ok() {
        tracing::debug!("Logger initialized for '{}'", bin_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_uses_crate_target() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // when (操作):
        let directive = default_directive("heya-server", "debug");

        // then (期待する結果):
        assert_eq!(directive, "heya_server=debug,tower_http=info");
    }

    #[test]
    fn test_setup_logger_twice_does_not_panic() {
        // テスト項目: 2 回目の初期化は無視される
        setup_logger("heya-shared", "info");
        setup_logger("heya-shared", "info");
    }
}
