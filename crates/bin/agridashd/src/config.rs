//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `agridash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use agridash_app::dashboard::DashboardConfig;
use agridash_domain::history::HistoryLimit;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Monitoring backend settings.
    pub backend: BackendConfig,
    /// Refresh periods.
    pub polling: PollingConfig,
    /// Chart image size.
    pub charts: ChartsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Monitoring backend configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend API, without the `/api` suffix.
    pub base_url: String,
    /// Per-request deadline in seconds. Unset means no deadline.
    pub request_timeout_secs: Option<u64>,
}

/// Periodic refresh configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Current readings period, in milliseconds.
    pub live_interval_ms: u64,
    /// History auto-refresh period, in seconds.
    pub history_interval_secs: u64,
    /// History window used until a range is selected.
    pub default_history_limit: u32,
}

/// Chart image configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    pub width: u32,
    pub height: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `agridash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("agridash.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("AGRIDASH_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("AGRIDASH_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("AGRIDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("AGRIDASH_BACKEND_URL") {
            self.backend.base_url = val;
        }
        if let Some(val) = var("AGRIDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if !(self.backend.base_url.starts_with("http://")
            || self.backend.base_url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "backend url `{}` must start with http:// or https://",
                self.backend.base_url
            )));
        }
        if self.backend.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "request timeout must be non-zero when set".to_string(),
            ));
        }
        if self.polling.live_interval_ms == 0 || self.polling.history_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "polling intervals must be non-zero".to_string(),
            ));
        }
        if self.polling.default_history_limit == 0 {
            return Err(ConfigError::Validation(
                "default history limit must be non-zero".to_string(),
            ));
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(ConfigError::Validation(
                "chart size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.backend.request_timeout_secs.map(Duration::from_secs)
    }

    /// Periods and default window for the dashboard services.
    #[must_use]
    pub fn dashboard(&self) -> DashboardConfig {
        DashboardConfig {
            live_interval: Duration::from_millis(self.polling.live_interval_ms),
            history_interval: Duration::from_secs(self.polling.history_interval_secs),
            default_limit: HistoryLimit::new(self.polling.default_history_limit),
        }
    }

    /// Page auto-reload period: the live period rounded up to whole seconds.
    #[must_use]
    pub fn refresh_seconds(&self) -> u32 {
        let secs = self.polling.live_interval_ms.div_ceil(1000).max(1);
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            live_interval_ms: 2000,
            history_interval_secs: 300,
            default_history_limit: HistoryLimit::DEFAULT.get(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "agridashd=info,agridash=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
