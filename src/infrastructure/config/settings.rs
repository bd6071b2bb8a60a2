//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all service settings.
//! Configuration is loaded from a TOML file, with environment variable
//! overrides for deployment-specific values (`EVENTFEED_DATABASE_URL`,
//! `EVENTFEED_BIND`).
//!
//! # Example
//!
//! ```no_run
//! use eventfeed::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::affiliate::AffiliateConfig;
use super::database::DatabaseConfig;
use super::listing::ListingConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::error::{ConfigError, Result};

pub const ENV_DATABASE_URL: &str = "EVENTFEED_DATABASE_URL";
pub const ENV_BIND: &str = "EVENTFEED_BIND";

/// Main service configuration.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Page sizes, ranking, and response caching.
    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub affiliate: AffiliateConfig,
}

impl Config {
    /// Parse configuration from TOML content and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_with_env(content, |key| std::env::var(key).ok())
    }

    /// Like [`Config::parse_toml`] with an explicit environment lookup.
    #[allow(clippy::result_large_err)]
    pub fn parse_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn apply_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env(ENV_DATABASE_URL).filter(|v| !v.trim().is_empty()) {
            self.database.url = url;
        }
        if let Some(bind) = env(ENV_BIND).filter(|v| !v.trim().is_empty()) {
            self.server.bind = bind;
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if let Err(e) = self.server.socket_addr() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind",
                reason: e.to_string(),
            }
            .into());
        }
        if let Err(e) = Url::parse(&self.server.public_origin) {
            return Err(ConfigError::InvalidValue {
                field: "server.public_origin",
                reason: e.to_string(),
            }
            .into());
        }
        if self.listing.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "listing.page_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.listing.related_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "listing.related_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        let half_life = self.listing.trending_half_life_hours;
        if !half_life.is_finite() || half_life <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "listing.trending_half_life_hours",
                reason: "must be a positive number".to_string(),
            }
            .into());
        }
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("'{}' is not one of pretty, json", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Site origin as a URL. Validated at load.
    pub fn public_origin(&self) -> Result<Url> {
        Ok(Url::parse(&self.server.public_origin)?)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
