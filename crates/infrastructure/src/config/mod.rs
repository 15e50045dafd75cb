//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `chaos`: initial fault-injection settings
//! - `resilience`: breaker recovery, pool, saturation and stressors
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml`, then `CATALOG_`-prefixed environment variables using `__`
//! between path segments (e.g. `CATALOG_CHAOS__DB_FAILURE_RATE=0.3`).

mod chaos;
mod resilience;
mod server;

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

pub use chaos::ChaosConfig;
pub use resilience::ResilienceAppConfig;
pub use server::{LogFormat, ServerConfig};

use crate::telemetry::TelemetryConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "CATALOG";

/// Application environment (development or production)
///
/// Controls whether internal error details reach HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details are exposed
    #[default]
    Development,
    /// Production environment - error details are hidden
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Initial chaos settings
    #[serde(default)]
    pub chaos: ChaosConfig,

    /// Resilience parameters
    #[serde(default)]
    pub resilience: ResilienceAppConfig,

    /// Logging and trace export
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, then the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Whether internal error details may be sent to clients
    #[must_use]
    pub const fn expose_internal_errors(&self) -> bool {
        matches!(self.environment, Environment::Development)
    }
}
