//! ConfigLoader: defaults, optional TOML file, then `SPLUNK__*` environment overlay.

use super::ServiceConfig;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from an optional file and the environment.
    ///
    /// Precedence: defaults (lowest) -> file -> environment (highest).
    pub fn load(path: Option<&Path>) -> Result<ServiceConfig, ApiError> {
        let mut builder = Self::builder_with_defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let builder = Self::add_environment(builder);
        Self::finish(builder)
    }

    /// Load configuration from a TOML string without the environment overlay.
    pub fn load_from_str(toml: &str) -> Result<ServiceConfig, ApiError> {
        let builder = Self::builder_with_defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Create default configuration.
    pub fn default() -> ServiceConfig {
        ServiceConfig::default()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = ServiceConfig::default();
        Config::builder()
            .set_default("connection.scheme", defaults.connection.scheme)?
            .set_default("connection.host", defaults.connection.host)?
            .set_default("connection.port", i64::from(defaults.connection.port))
    }

    /// Uses SPLUNK prefix and __ as separator for nested keys.
    fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix("SPLUNK")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<ServiceConfig, ApiError> {
        let config: ServiceConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }
}
