//! Configuration management for soultrip.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "soultrip";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "soultrip.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SOULTRIP_`, `__` between sections)
/// 2. TOML config file at `~/.config/soultrip/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Admin login configuration.
    pub admin: AdminConfig,
    /// Image upload configuration.
    pub uploads: UploadConfig,
    /// Cache configuration.
    pub cache: CacheConfig,
    /// Rate limiting configuration.
    pub rate_limit: RateLimitSettings,
    /// Outgoing mail configuration.
    pub mail: MailConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory served as static files; uploads are stored below it.
    pub public_dir: PathBuf,
    /// Answer cross-origin requests.
    pub cors: bool,
}

/// Database configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/soultrip/soultrip.db`
    pub path: Option<PathBuf>,
}

/// Admin login configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Admin user name.
    pub username: String,
    /// Admin password.
    pub password: String,
    /// How long a login stays valid, in hours.
    pub session_ttl_hours: u64,
    /// Mark the session cookie `Secure` (requires HTTPS).
    pub secure_cookies: bool,
}

/// Image upload configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted image in bytes.
    pub max_bytes: usize,
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long site settings stay cached, in seconds.
    pub settings_ttl_secs: u64,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Requests allowed per client across the whole site.
    pub requests: u32,
    /// Window for `requests`, in seconds.
    pub per_secs: u32,
    /// Settings writes allowed per client.
    pub settings_requests: u32,
    /// Window for `settings_requests`, in seconds.
    pub settings_per_secs: u32,
}

/// Outgoing mail configuration.
///
/// Mail is only sent over SMTP when `host` is set; otherwise messages are
/// written to the log.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// SMTP relay host.
    pub host: Option<String>,
    /// SMTP port.
    pub port: u16,
    /// SMTP user name.
    pub username: Option<String>,
    /// SMTP password.
    pub password: Option<String>,
    /// Sender address for every message.
    pub from: String,
    /// Upgrade the connection with STARTTLS.
    pub starttls: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            cors: true,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            session_ttl_hours: 24,
            secure_cookies: false,
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            settings_ttl_secs: 5 * 60,
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            requests: 500,
            per_secs: 15 * 60,
            settings_requests: 50,
            settings_per_secs: 60,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            username: None,
            password: None,
            from: "no-reply@soultriptours.com".to_string(),
            starttls: true,
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("starttls", &self.starttls)
            .finish()
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("SOULTRIP_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("server.port must be greater than 0"));
        }

        if self.admin.username.trim().is_empty() || self.admin.password.is_empty() {
            return Err(invalid("admin.username and admin.password must be set"));
        }

        if self.admin.session_ttl_hours == 0 {
            return Err(invalid("admin.session_ttl_hours must be greater than 0"));
        }

        if self.uploads.max_bytes == 0 {
            return Err(invalid("uploads.max_bytes must be greater than 0"));
        }

        if self.cache.settings_ttl_secs == 0 {
            return Err(invalid("cache.settings_ttl_secs must be greater than 0"));
        }

        let limits = &self.rate_limit;
        if limits.requests == 0
            || limits.per_secs == 0
            || limits.settings_requests == 0
            || limits.settings_per_secs == 0
        {
            return Err(invalid("rate_limit values must be greater than 0"));
        }

        if self.mail.from.trim().is_empty() {
            return Err(invalid("mail.from must be set"));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a valid address.
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| invalid(format!("invalid server address: {e}")))
    }

    /// Get the session lifetime as a Duration.
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.admin.session_ttl_hours * 60 * 60)
    }

    /// Get the settings cache lifetime as a Duration.
    #[must_use]
    pub fn settings_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.settings_ttl_secs)
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::ConfigValidation {
        message: message.into(),
    }
}
