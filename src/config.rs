//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines
//! constants for HTTP cache headers, the dataset location, API metadata and
//! logging. `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// The dataset never changes while the process runs, so data responses can be
// cached by upstream proxies. Values are in seconds.

/// Dataset responses - immutable for the process lifetime
pub const HTTP_CACHE_DATA_MAX_AGE: u32 = 300;
pub const HTTP_CACHE_DATA_SWR: u32 = 60;

pub const CACHE_CONTROL_DATA: &str = formatcp!(
    "public, max-age={}, stale-while-revalidate={}",
    HTTP_CACHE_DATA_MAX_AGE,
    HTTP_CACHE_DATA_SWR
);

// =============================================================================
// Server Lifecycle
// =============================================================================

/// How long graceful shutdown waits for open connections to finish
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Dataset location, relative to the directory holding the executable
pub const DEFAULT_DATASET_PATH: &str = "data/stress_dataset.csv";

/// Column examined by the stress projection endpoint
pub const DEFAULT_STRESS_COLUMN: &str = "Which type of stress do you primarily experience?";

/// Key holding the 1-based row number in each stress record
pub const STRESS_RECORD_ID_KEY: &str = "id";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "stress_api=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8000;

pub const DEFAULT_API_TITLE: &str = "Stress Dataset API";
pub const DEFAULT_API_DESCRIPTION: &str = "A simple API to serve the stress dataset";
pub const DEFAULT_API_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Dataset location and projection column
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Metadata published in the OpenAPI document
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }
    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// CSV file path. Relative paths resolve against the executable's directory.
    #[serde(default = "DatasetConfig::default_path")]
    pub path: PathBuf,
    /// Column projected by `/data/stress`
    #[serde(default = "DatasetConfig::default_stress_column")]
    pub stress_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            stress_column: Self::default_stress_column(),
        }
    }
}

impl DatasetConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_DATASET_PATH)
    }
    fn default_stress_column() -> String {
        DEFAULT_STRESS_COLUMN.to_string()
    }

    /// Resolve the dataset path against `base_dir` unless it is already absolute.
    pub fn resolve_path(&self, base_dir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            base_dir.join(&self.path)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_title")]
    pub title: String,
    #[serde(default = "ApiConfig::default_description")]
    pub description: String,
    #[serde(default = "ApiConfig::default_version")]
    pub version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            description: Self::default_description(),
            version: Self::default_version(),
        }
    }
}

impl ApiConfig {
    fn default_title() -> String {
        DEFAULT_API_TITLE.to_string()
    }
    fn default_description() -> String {
        DEFAULT_API_DESCRIPTION.to_string()
    }
    fn default_version() -> String {
        DEFAULT_API_VERSION.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    ///
    /// Only the default path may be absent; a path the operator named
    /// explicitly must exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P, explicit: bool) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;

        match config.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Unknown logging.format '{}', expected \"text\" or \"json\"",
                    other
                )))
            }
        }

        if config.dataset.stress_column.is_empty() {
            return Err(ConfigError::Validation(
                "dataset.stress_column must not be empty".to_string(),
            ));
        }

        // `id` is the synthetic key of every stress record
        if config.dataset.stress_column == STRESS_RECORD_ID_KEY {
            return Err(ConfigError::Validation(format!(
                "dataset.stress_column cannot be '{}'",
                STRESS_RECORD_ID_KEY
            )));
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
