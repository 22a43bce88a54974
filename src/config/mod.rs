//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `PARKING_MEMBERSHIP`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use parking_membership::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod registry;
mod server;

pub use error::{ConfigError, ValidationError};
pub use registry::RegistryConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

use crate::application::RegistrySettings;
use crate::domain::foundation::AccountId;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Registry configuration (accounts, fee token, fee schedule)
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PARKING_MEMBERSHIP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PARKING_MEMBERSHIP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PARKING_MEMBERSHIP__REGISTRY__INTERVAL_SECS=600` -> `registry.interval_secs = 600`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PARKING_MEMBERSHIP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.registry.validate()?;
        Ok(())
    }

    /// Registry settings derived from the registry section.
    pub fn registry_settings(&self) -> Result<RegistrySettings, ValidationError> {
        let account = AccountId::new(self.registry.registry_account.as_str())
            .map_err(|_| ValidationError::MissingRequired("REGISTRY_ACCOUNT"))?;

        Ok(RegistrySettings::new(account)
            .with_fee_schedule(self.registry.fee_schedule()?)
            .with_re_registration(self.registry.re_registration)
            .with_settlement(self.registry.settlement))
    }
}
