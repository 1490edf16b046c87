use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub pagination: PaginationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default)]
    pub max_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: None,
        }
    }
}

fn default_database_url() -> String {
    "sqlite:amora.db".to_string()
}

/// Bounds for the profile listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationSettings {
    #[serde(default = "default_list_limit")]
    pub default_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_list_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_list_limit() -> u32 {
    10
}
fn default_max_limit() -> u32 {
    100
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_city_weight")]
    pub city: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            age: default_age_weight(),
            city: default_city_weight(),
        }
    }
}

fn default_interests_weight() -> f64 {
    0.5
}
fn default_age_weight() -> f64 {
    0.3
}
fn default_city_weight() -> f64 {
    0.2
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values baked into the structs
    /// 2. config/default.toml (optional)
    /// 3. config/local.toml (optional, development overrides)
    /// 4. Environment variables, e.g. AMORA__SERVER__PORT -> server.port
    /// 5. A plain DATABASE_URL variable for the database url
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("AMORA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        builder.build()?.try_deserialize()
    }
}
