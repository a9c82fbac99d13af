use common::ObjectStorageConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}
fn default_connect_timeout_secs() -> u64 {
    8
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL usually embeds a password.
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
}

impl LogConfig {
    pub fn max_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: ObjectStorageConfig,
    pub log: LogConfig,
}

/// Flat environment variables accepted alongside `INTEGRATIONS__*` overrides.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("AWS_ACCESS_KEY", "storage.access_key"),
    ("AWS_SECRET_KEY", "storage.secret_key"),
    ("AWS_REGION", "storage.region"),
    ("BUCKET_NAME", "storage.bucket"),
    ("DATABASE_URL", "database.url"),
];

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8501)?
            .set_default("log.level", "info")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., INTEGRATIONS__STORAGE__BUCKET)
            .add_source(Environment::with_prefix("INTEGRATIONS").separator("__"));

        for (var, key) in LEGACY_ENV {
            let value = std::env::var(var).ok().filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }
}
