use std::fmt;

use config::Config as ConfigLoader;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Token signing settings. The secret is base64 and never printed.
#[derive(Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_minutes: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expires_minutes", &self.expires_minutes)
            .finish()
    }
}

/// Where and how to announce freshly registered accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

/// First-start seeding: the administrator account created when absent.
#[derive(Clone, Deserialize)]
pub struct BootstrapConfig {
    pub admin_email: String,
    pub admin_nickname: String,
    pub admin_password: String,
}

impl fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_nickname", &self.admin_nickname)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub directory: DirectoryConfig,
    pub bootstrap: BootstrapConfig,
}

impl Config {
    /// Layered load: `config/default.toml`, then `config/{RUN_MODE}.toml`,
    /// then `APP_`-prefixed environment variables with `__` separating
    /// nesting levels (e.g. `APP_JWT__SECRET`).
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
