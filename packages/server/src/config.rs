//! Server configuration.
//!
//! The listening port comes from the first positional argument, then the
//! `PORT` environment variable, then a `PORT` line in `./.env`, then
//! [`DEFAULT_PORT`].

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::usecase::DEFAULT_QUEUE_CAPACITY;

/// Port used when neither the command line nor `PORT` names one
pub const DEFAULT_PORT: u16 = 3033;

/// Environment variable consulted for the port
pub const PORT_ENV: &str = "PORT";

/// Dotenv file read for variables the process environment leaves unset
pub const DOTENV_FILE: &str = ".env";

/// Configuration errors. These abort startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port in {source_name}: '{value}'")]
    InvalidPort { source_name: String, value: String },

    #[error("queue capacity must be at least 1")]
    InvalidQueueCapacity,
}

/// Command line arguments for `heya-server`
#[derive(Debug, Parser)]
#[command(name = "heya-server", version, about = "Room-based WebSocket message relay")]
pub struct Cli {
    /// Port to listen on (overrides the PORT environment variable)
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Deliveries buffered ahead of the broadcaster before readers wait
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Directory served under /st/
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Directory holding the index, test and old pages
    #[arg(long, default_value = "template")]
    pub template_dir: PathBuf,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub queue_capacity: usize,
    pub static_dir: PathBuf,
    pub template_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            static_dir: PathBuf::from("static"),
            template_dir: PathBuf::from("template"),
        }
    }
}

impl ServerConfig {
    /// Resolve the configuration from parsed arguments and the raw value of
    /// `PORT` (if set).
    pub fn resolve(cli: Cli, env_port: Option<String>) -> Result<Self, ConfigError> {
        let port = match (cli.port, env_port.filter(|value| !value.is_empty())) {
            (Some(port), _) => port,
            (None, Some(value)) => {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort {
                        source_name: PORT_ENV.to_string(),
                        value,
                    })?
            }
            (None, None) => DEFAULT_PORT,
        };

        if cli.queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity);
        }

        Ok(Self {
            host: cli.host,
            port,
            queue_capacity: cli.queue_capacity,
            static_dir: cli.static_dir,
            template_dir: cli.template_dir,
        })
    }

    /// Parse the process arguments and environment. A variable set in the
    /// process environment wins over the same one in [`DOTENV_FILE`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_port = std::env::var(PORT_ENV)
            .ok()
            .or_else(|| dotenv_var(Path::new(DOTENV_FILE), PORT_ENV));
        Self::resolve(Cli::parse(), env_port)
    }

    /// Address string handed to the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Value of `name` in a dotenv file. A missing or unreadable file is the same
/// as an unset variable.
fn dotenv_var(path: &Path, name: &str) -> Option<String> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) => {
            if !e.not_found() {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
            }
            return None;
        }
    };
    entries
        .filter_map(Result::ok)
        .find_map(|(key, value)| (key == name).then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dotenv(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DOTENV_FILE), contents).unwrap();
        dir
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("heya-server").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_port_when_nothing_given() {
        // テスト項目: 引数も環境変数も無ければデフォルトポートが使われる
        // when (操作):
        let config = ServerConfig::resolve(cli(&[]), None).unwrap();

        // then (期待する結果):
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3033);
    }

    #[test]
    fn test_env_port_used_without_argument() {
        // テスト項目: 引数が無ければ PORT 環境変数が使われる
        // when (操作):
        let config = ServerConfig::resolve(cli(&[]), Some("8080".to_string())).unwrap();

        // then (期待する結果):
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_positional_port_overrides_env() {
        // テスト項目: 第 1 引数のポートが PORT 環境変数より優先される
        // when (操作):
        let config = ServerConfig::resolve(cli(&["9000"]), Some("8080".to_string())).unwrap();

        // then (期待する結果):
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_empty_env_port_is_ignored() {
        // テスト項目: 空の PORT は未設定として扱われる
        // when (操作):
        let config = ServerConfig::resolve(cli(&[]), Some(String::new())).unwrap();

        // then (期待する結果):
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_env_port() {
        // テスト項目: 数値でない PORT は設定エラーになる
        // when (操作):
        let result = ServerConfig::resolve(cli(&[]), Some("http".to_string()));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigError::InvalidPort {
                source_name: "PORT".to_string(),
                value: "http".to_string(),
            })
        );
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        // テスト項目: キュー容量 0 は設定エラーになる
        // when (操作):
        let result = ServerConfig::resolve(cli(&["--queue-capacity", "0"]), None);

        // then (期待する結果):
        assert_eq!(result, Err(ConfigError::InvalidQueueCapacity));
    }

    #[test]
    fn test_flags_are_applied() {
        // テスト項目: ホスト・キュー容量・静的ディレクトリのフラグが反映される
        // when (操作):
        let config = ServerConfig::resolve(
            cli(&[
                "4000",
                "--host",
                "127.0.0.1",
                "--queue-capacity",
                "16",
                "--static-dir",
                "public",
                "--template-dir",
                "pages",
            ]),
            None,
        )
        .unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_address(), "127.0.0.1:4000");
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.template_dir, PathBuf::from("pages"));
    }

    #[test]
    fn test_dotenv_port_is_read() {
        // テスト項目: .env の PORT 行が読み取られ、ポートとして使われる
        // given (前提条件):
        let dir = write_dotenv("# local settings\nRUST_LOG=info\nPORT=4000\n");

        // when (操作):
        let env_port = dotenv_var(&dir.path().join(DOTENV_FILE), PORT_ENV);
        let config = ServerConfig::resolve(cli(&[]), env_port).unwrap();

        // then (期待する結果):
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_dotenv_without_port() {
        // テスト項目: PORT を含まない .env は未設定として扱われる
        // given (前提条件):
        let dir = write_dotenv("RUST_LOG=info\n");

        // when (操作):
        let env_port = dotenv_var(&dir.path().join(DOTENV_FILE), PORT_ENV);

        // then (期待する結果):
        assert_eq!(env_port, None);
    }

    #[test]
    fn test_missing_dotenv_file() {
        // テスト項目: .env が存在しなくてもエラーにならない
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();

        // when (操作):
        let env_port = dotenv_var(&dir.path().join(DOTENV_FILE), PORT_ENV);

        // then (期待する結果):
        assert_eq!(env_port, None);
    }
}
