use std::env;

use auth::LifetimeError;
use auth::TokenLifetime;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::user::errors::UserError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Which credential store backs the service.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Human-readable lifetime such as `"1h"` or `"30 minutes"`.
    ///
    /// A number without a unit counts milliseconds: `"3600"` is 3.6 seconds,
    /// not an hour. Always give a unit.
    #[serde(default = "default_expiration")]
    pub expiration: String,
}

/// Administrator account created at startup when absent.
///
/// Without one, the admin routes are unreachable on a fresh store.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "default_admin_name")]
    pub name: String,
    pub email: String,
    pub password: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration() -> String {
    "1h".to_string()
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

impl JwtConfig {
    /// Parse the configured token lifetime.
    ///
    /// # Errors
    /// Any [`LifetimeError`]; the service refuses to start on one.
    pub fn token_lifetime(&self) -> Result<TokenLifetime, LifetimeError> {
        TokenLifetime::parse(&self.expiration)
    }
}

impl AdminConfig {
    /// Validate into a command creating the administrator.
    ///
    /// # Errors
    /// * `InvalidName` / `InvalidEmail` - The configured values are malformed
    pub fn to_command(&self) -> Result<CreateUserCommand, UserError> {
        Ok(CreateUserCommand {
            name: DisplayName::new(self.name.clone())?,
            email: EmailAddress::new(self.email.clone())?,
            password: self.password.clone(),
            role: Role::Admin,
        })
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
        // JWT__SECRET=... overrides jwt.secret
        Self::load_with(Environment::default().separator("__"))
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        configuration.try_deserialize()
    }
}
