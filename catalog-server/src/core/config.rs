use catalog_client::RemoteConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable             | Default               | Meaning                       |
/// |----------------------|-----------------------|-------------------------------|
/// | HTTP_PORT            | 3000                  | HTTP API port                 |
/// | REMOTE_CATALOG_URL   | http://localhost:8080 | Remote catalog base URL       |
/// | REMOTE_CATALOG_TOKEN | (none)                | Bearer token for remote calls |
/// | REMOTE_TIMEOUT_MS    | 30000                 | Remote request timeout (ms)   |
/// | LOG_LEVEL            | info                  | Tracing level filter          |
/// | LOG_DIR              | (none)                | Daily-rolling log directory   |
/// | ENVIRONMENT          | development           | development \| production     |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 REMOTE_CATALOG_URL=https://catalog.internal cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Remote catalog base URL
    pub remote_catalog_url: String,
    /// Bearer token for the remote catalog, if any
    pub remote_catalog_token: Option<String>,
    /// Remote request timeout in milliseconds
    pub remote_timeout_ms: u64,
    /// Log level filter
    pub log_level: String,
    /// Log directory for daily-rolling files; stdout only when unset
    pub log_dir: Option<String>,
    /// Runtime environment: development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            remote_catalog_url: std::env::var("REMOTE_CATALOG_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            remote_catalog_token: std::env::var("REMOTE_CATALOG_TOKEN").ok(),
            remote_timeout_ms: std::env::var("REMOTE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30_000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Remote adapter configuration derived from this server config.
    pub fn remote_config(&self) -> RemoteConfig {
        let config = RemoteConfig::new(&self.remote_catalog_url)
            .with_timeout_ms(self.remote_timeout_ms);
        match &self.remote_catalog_token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}
