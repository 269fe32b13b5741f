//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Payslip storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
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
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604_800 // 7 days
}

/// Payslip storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend: "fs" or "s3".
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// Root directory for the fs backend.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// S3 endpoint URL (s3 backend only).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// S3 bucket name (s3 backend only).
    #[serde(default)]
    pub bucket: Option<String>,
    /// S3 access key id (s3 backend only).
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// S3 secret access key (s3 backend only).
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// S3 region (s3 backend only).
    #[serde(default)]
    pub region: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            root: default_storage_root(),
            endpoint: None,
            bucket: None,
            access_key_id: None,
            secret_access_key: None,
            region: None,
        }
    }
}

fn default_storage_backend() -> String {
    "fs".to_string()
}

fn default_storage_root() -> String {
    "./uploads".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ATRIUM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
