//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub platform: PlatformConfig,
    pub storage: StorageConfig,
    pub redis: RedisConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Bot identity and reply limits
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// The bot's own user id, used to recognise its own reactions
    pub user_id: i64,
    /// Maximum length of a message body the platform accepts
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

/// Chat platform REST API settings
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    pub api_base: String,
    pub token: String,
    /// Base URL for message jump links
    #[serde(default = "default_web_base")]
    pub web_base: String,
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

/// Where channel preferences are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

/// Preference storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration (inbound event stream)
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_events_channel")]
    pub events_channel: String,
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

// Default value functions
fn default_app_name() -> String {
    "pinbot".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_message_length() -> usize {
    2000
}

fn default_web_base() -> String {
    "https://discord.com".to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_events_channel() -> String {
    "broadcast".to_string()
}

fn default_reconnect_delay_ms() -> u64 {
    1000
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORAGE_BACKEND") {
            None => StorageBackend::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "postgres" => StorageBackend::Postgres,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", s)),
            },
        };

        let database_url = lookup("DATABASE_URL");
        if backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingVar("DATABASE_URL"));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            bot: BotConfig {
                user_id: required(&lookup, "BOT_USER_ID")?,
                max_message_length: optional(&lookup, "BOT_MAX_MESSAGE_LENGTH")?
                    .unwrap_or_else(default_max_message_length),
            },
            platform: PlatformConfig {
                api_base: lookup("PLATFORM_API_BASE")
                    .ok_or(ConfigError::MissingVar("PLATFORM_API_BASE"))?,
                token: lookup("PLATFORM_TOKEN").ok_or(ConfigError::MissingVar("PLATFORM_TOKEN"))?,
                web_base: lookup("PLATFORM_WEB_BASE").unwrap_or_else(default_web_base),
                http_timeout_ms: optional(&lookup, "PLATFORM_HTTP_TIMEOUT_MS")?
                    .unwrap_or_else(default_http_timeout_ms),
            },
            storage: StorageConfig {
                backend,
                database_url,
                max_connections: optional(&lookup, "DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: optional(&lookup, "DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            redis: RedisConfig {
                url: lookup("REDIS_URL").ok_or(ConfigError::MissingVar("REDIS_URL"))?,
                events_channel: lookup("REDIS_EVENTS_CHANNEL")
                    .unwrap_or_else(default_events_channel),
                reconnect_delay_ms: optional(&lookup, "REDIS_RECONNECT_DELAY_MS")?
                    .unwrap_or_else(default_reconnect_delay_ms),
            },
        })
    }
}

fn required<F, T>(lookup: &F, key: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    optional(lookup, key)?.ok_or(ConfigError::MissingVar(key))
}

fn optional<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
