//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session cookie configuration.
    pub session: SessionConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// History endpoint configuration.
    #[serde(default)]
    pub history: HistoryConfig,
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
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
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Session configuration.
///
/// The cookie is issued elsewhere; this service only reads and clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Secret used to verify session tokens.
    pub secret: String,
    /// Session token lifetime in seconds.
    #[serde(default = "default_session_expiry")]
    pub token_expiry_secs: u64,
}

fn default_cookie_name() -> String {
    "talentscan_session".to_string()
}

fn default_session_expiry() -> u64 {
    604_800 // 7 days
}

/// Object storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Google Cloud Storage.
    #[default]
    Gcs,
    /// S3-compatible storage.
    S3,
    /// Local filesystem (development only).
    Local,
    /// In-process memory (tests only).
    Memory,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Backend to use.
    pub backend: StorageBackend,
    /// Bucket name. Part of every public URL.
    pub bucket: String,
    /// Root directory for the local backend.
    pub root: String,
    /// Endpoint override (S3, emulators).
    pub endpoint: Option<String>,
    /// Region (S3).
    pub region: Option<String>,
    /// Access key ID (S3).
    pub access_key_id: Option<String>,
    /// Secret access key (S3).
    pub secret_access_key: Option<String>,
    /// Path to a service account JSON file (GCS).
    pub credential_path: Option<String>,
    /// Static OAuth access token for the GCS JSON API. Falls back to the
    /// metadata server when unset.
    pub access_token: Option<String>,
    /// Base of public object URLs.
    pub public_base_url: String,
    /// Upload slot lifetime in seconds.
    pub upload_ttl_secs: u64,
    /// Maximum avatar size in bytes.
    pub avatar_max_size: u64,
    /// Maximum CV size in bytes.
    pub cv_max_size: u64,
    /// Interval between expired-slot sweeps in seconds. Zero disables the sweeper.
    pub sweep_interval_secs: u64,
    /// Maximum slots collected per sweep.
    pub sweep_batch_size: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: "talentscan-uploads".to_string(),
            root: "./storage".to_string(),
            endpoint: None,
            region: None,
            access_key_id: None,
            secret_access_key: None,
            credential_path: None,
            access_token: None,
            public_base_url: "https://storage.googleapis.com".to_string(),
            upload_ttl_secs: 900,
            avatar_max_size: 5 * 1024 * 1024,
            cv_max_size: 10 * 1024 * 1024,
            sweep_interval_secs: 600,
            sweep_batch_size: 100,
        }
    }
}

/// History endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of recent activity entries returned.
    pub recent_limit: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { recent_limit: 10 }
    }
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
            .add_source(config::Environment::with_prefix("TALENTSCAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
