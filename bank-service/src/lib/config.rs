use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::account::models::UserId;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub identifiers: IdentifierConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. Without one the service keeps accounts in memory.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Upper bound for every credential store call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentifierConfig {
    #[serde(default = "default_user_id_length")]
    pub user_id_length: usize,
    #[serde(default = "default_pin_length")]
    pub pin_length: usize,
    /// Registration attempts before giving up on identifier collisions.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_connections() -> u32 {
    5
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_user_id_length() -> usize {
    8
}

fn default_pin_length() -> usize {
    6
}

fn default_max_attempts() -> u32 {
    16
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            user_id_length: default_user_id_length(),
            pin_length: default_pin_length(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl DatabaseConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl JwtConfig {
    /// Token lifetime, if `expiration_hours` fits in a `chrono::Duration`.
    pub fn ttl(&self) -> Result<chrono::Duration, ConfigError> {
        chrono::Duration::try_hours(self.expiration_hours).ok_or_else(|| {
            ConfigError::Message("jwt.expiration_hours is out of range".to_string())
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that would make the service unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }
        // Every issued token needs an `exp` that chrono can represent.
        if chrono::Utc::now().checked_add_signed(self.jwt.ttl()?).is_none() {
            return Err(ConfigError::Message(
                "jwt.expiration_hours is out of range".to_string(),
            ));
        }
        if self.identifiers.user_id_length == 0 || self.identifiers.pin_length == 0 {
            return Err(ConfigError::Message(
                "identifier lengths must be positive".to_string(),
            ));
        }
        if self.identifiers.user_id_length > UserId::MAX_LENGTH {
            return Err(ConfigError::Message(format!(
                "identifiers.user_id_length must be at most {}",
                UserId::MAX_LENGTH
            )));
        }
        if self.identifiers.max_attempts == 0 {
            return Err(ConfigError::Message(
                "identifiers.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.database.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "database.timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
