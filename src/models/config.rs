//! Configuration model loaded from external sources.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across the application.
pub struct AppConfig {
    pub database_url: String,
    pub signatures_dir: String,
    /// Bypasses status-transition and delete-eligibility checks.
    #[serde(default)]
    pub debug_mode: bool,
}

impl AppConfig {
    /// Loads configuration from the given YAML file, letting
    /// `QREPORT_`-prefixed environment variables override file values.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("QREPORT"))
            .build()?
            .try_deserialize()
    }
}
