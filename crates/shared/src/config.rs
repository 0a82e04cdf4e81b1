//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Pagination limits for list endpoints.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` string to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "famwallet=debug,tower_http=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Pagination configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the client does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound on the page size a client may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// then `FAMWALLET__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FAMWALLET").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
