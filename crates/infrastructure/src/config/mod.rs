//! Application configuration
//!
//! Split into focused sub-modules:
//! - `device`: RainMachine address, credentials, TLS
//! - `upload`: which records are sent and how outcomes are logged
//!
//! Logging settings live in [`crate::telemetry`].
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file
//! (`rainmachine.toml` in the working directory, or an explicit path), then
//! environment variables such as `RAINMACHINE_DEVICE__IP` or
//! `RAINMACHINE_LOGGING__LEVEL`.

mod device;
mod upload;

use std::path::Path;

use integration_rainmachine::RainMachineConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use device::DeviceConfig;
pub use upload::UploadConfig;

use crate::telemetry::LoggingConfig;

/// Default configuration file name (extension is inferred)
pub const DEFAULT_CONFIG_NAME: &str = "rainmachine";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "RAINMACHINE";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// `RAINMACHINE_<SECTION>__<KEY>` variables
///
/// Values stay strings until deserialized so numeric-looking secrets survive.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Configuration was read but is not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// RainMachine connection settings
    #[serde(default)]
    pub device: DeviceConfig,

    /// Upload policy
    #[serde(default)]
    pub upload: UploadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// With `path` set the file must exist; otherwise `rainmachine.toml` is
    /// read when present.
    pub fn load(path: Option<&Path>) -> Result<Self, AppConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, AppConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(device = ?app.device, upload = ?app.upload, "Configuration loaded");
        Ok(app)
    }

    /// Build the forwarder configuration
    #[must_use]
    pub fn to_rainmachine_config(&self) -> RainMachineConfig {
        RainMachineConfig {
            ip: self.device.ip.trim().to_string(),
            token: self.device.token_str().map(str::to_string),
            password: self.device.password_str().map(str::to_string),
            use_ssl: self.device.use_ssl,
            port: self.device.port,
            verify_certificates: self.device.verify_certificates,
            timeout_secs: self.device.timeout_secs,
            skip_upload: self.upload.skip_upload,
            post_interval_secs: self.upload.post_interval_secs,
            stale_secs: self.upload.stale_secs,
            log_success: self.upload.log_success,
            log_failure: self.upload.log_failure,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AppConfigError> {
        self.to_rainmachine_config()
            .validate()
            .map_err(|e| AppConfigError::Invalid(e.to_string()))
    }
}
