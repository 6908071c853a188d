//! Environment-driven server configuration.

use folio_core::LogLevel;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_FILE: &str = "data/projects.json";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON file holding the project collection.
    pub data_file: PathBuf,
    pub log_level: LogLevel,
    /// Absolute directory for rolling log files; logs go to stderr when unset.
    pub log_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Reads `FOLIO_*` variables, falling back to defaults for unset or
    /// unparseable values.
    ///
    /// Relative paths are resolved against `base_dir`.
    pub fn from_env(base_dir: PathBuf) -> Self {
        Self::from_lookup(base_dir, |name| env::var(name).ok())
    }

    pub fn from_lookup(base_dir: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("FOLIO_BIND_ADDR")
            .and_then(|value| value.trim().parse::<SocketAddr>().ok())
            .unwrap_or_else(default_bind_addr);
        let data_file = lookup("FOLIO_DATA_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let log_level = lookup("FOLIO_LOG_LEVEL")
            .and_then(|value| value.parse::<LogLevel>().ok())
            .unwrap_or_else(LogLevel::default_for_build);
        let log_dir = lookup("FOLIO_LOG_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let max_body_bytes = lookup("FOLIO_MAX_BODY_BYTES")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Self {
            bind_addr,
            data_file: absolutize(&base_dir, data_file),
            log_level,
            log_dir: log_dir.map(|dir| absolutize(&base_dir, dir)),
            max_body_bytes,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn absolutize(base_dir: &std::path::Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
