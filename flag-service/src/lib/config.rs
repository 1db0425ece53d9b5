use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Session token settings.
///
/// `secret` is the process-wide signing key; it must be provided by the
/// environment (`FLAGS_TOKEN__SECRET`) and must not be empty. `ttl_seconds`
/// must be positive.
#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// Argon2 work factor applied to newly hashed passwords.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FLAGS_DATABASE__URL, FLAGS_TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(environment())
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8081)?
            .set_default("token.ttl_seconds", auth::DEFAULT_TTL_SECONDS)?
            .set_default("password.memory_kib", i64::from(argon2_defaults::MEMORY_KIB))?
            .set_default("password.iterations", i64::from(argon2_defaults::ITERATIONS))?
            .set_default("password.parallelism", i64::from(argon2_defaults::PARALLELISM))?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.token.secret.is_empty() {
            return Err(ConfigError::Message(
                "token.secret must not be empty".to_string(),
            ));
        }

        if self.token.ttl_seconds <= 0 {
            return Err(ConfigError::Message(format!(
                "token.ttl_seconds must be positive, got {}",
                self.token.ttl_seconds
            )));
        }

        Ok(())
    }
}

/// Only `FLAGS_`-prefixed variables are read, so unrelated variables such as
/// `PASSWORD` or `TOKEN` cannot shadow a whole section.
///
/// Example: FLAGS_TOKEN__SECRET=... overrides token.secret
fn environment() -> Environment {
    Environment::with_prefix("FLAGS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Argon2id defaults (OWASP recommended minimum).
mod argon2_defaults {
    pub const MEMORY_KIB: u32 = 19 * 1024;
    pub const ITERATIONS: u32 = 2;
    pub const PARALLELISM: u32 = 1;
}
