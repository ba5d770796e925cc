use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Every section and field falls back to the `default_*` values below, so
/// the environment only needs to name what it overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub latency: LatencyConfig,
    pub storage: StorageConfig,
    pub list: ListConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Artificial delays applied by the mock data sources, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_read_ms")]
    pub read_ms: u64,
    #[serde(default = "default_lookup_ms")]
    pub lookup_ms: u64,
    #[serde(default = "default_count_ms")]
    pub count_ms: u64,
    #[serde(default = "default_write_ms")]
    pub write_ms: u64,
}

impl LatencyConfig {
    /// No delays at all; used by tests.
    pub const NONE: LatencyConfig = LatencyConfig {
        read_ms: 0,
        lookup_ms: 0,
        count_ms: 0,
        write_ms: 0,
    };

    pub fn read(&self) -> Duration {
        Duration::from_millis(self.read_ms)
    }

    pub fn lookup(&self) -> Duration {
        Duration::from_millis(self.lookup_ms)
    }

    pub fn count(&self) -> Duration {
        Duration::from_millis(self.count_ms)
    }

    pub fn write(&self) -> Duration {
        Duration::from_millis(self.write_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            read_ms: default_read_ms(),
            lookup_ms: default_lookup_ms(),
            count_ms: default_count_ms(),
            write_ms: default_write_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl ListConfig {
    /// Resolves a requested page size against the configured bounds.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_read_ms() -> u64 {
    300
}

fn default_lookup_ms() -> u64 {
    200
}

fn default_count_ms() -> u64 {
    100
}

fn default_write_ms() -> u64 {
    500
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/kv.json")
}

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    50
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
