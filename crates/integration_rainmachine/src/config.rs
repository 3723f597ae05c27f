//! RainMachine connection and upload configuration

use serde::{Deserialize, Serialize};

use crate::error::RainMachineError;

/// Local API port when `use_ssl` is enabled
pub const DEFAULT_HTTPS_PORT: u16 = 8080;

/// Local API port when `use_ssl` is disabled
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Configuration for a RainMachine controller on the local network
///
/// Immutable once the forwarder is constructed.
#[allow(clippy::struct_excessive_bools)] // Configuration needs multiple boolean flags
#[derive(Clone, Serialize, Deserialize)]
pub struct RainMachineConfig {
    /// IP address or host name of the controller
    pub ip: String,

    /// Pre-issued access token, used until the device rejects it
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Device password, used to obtain new access tokens
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Talk HTTPS to the device (default: true)
    #[serde(default = "default_true", rename = "usessl", alias = "use_ssl")]
    pub use_ssl: bool,

    /// Port override; defaults to 8080 (HTTPS) or 8081 (HTTP)
    #[serde(default)]
    pub port: Option<u16>,

    /// Verify the device TLS certificate (default: false, devices ship self-signed certificates)
    #[serde(default)]
    pub verify_certificates: bool,

    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Build payloads but never send them
    #[serde(default)]
    pub skip_upload: bool,

    /// Minimum seconds between posted records (0 posts every record)
    #[serde(default)]
    pub post_interval_secs: u64,

    /// Records older than this many seconds are not posted
    #[serde(default)]
    pub stale_secs: Option<u64>,

    /// Log successful uploads
    #[serde(default = "default_true")]
    pub log_success: bool,

    /// Log failed uploads
    #[serde(default = "default_true")]
    pub log_failure: bool,
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    60
}

impl Default for RainMachineConfig {
    fn default() -> Self {
        Self {
            ip: String::new(),
            token: None,
            password: None,
            use_ssl: true,
            port: None,
            verify_certificates: false,
            timeout_secs: default_timeout_secs(),
            skip_upload: false,
            post_interval_secs: 0,
            stale_secs: None,
            log_success: true,
            log_failure: true,
        }
    }
}

impl std::fmt::Debug for RainMachineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RainMachineConfig")
            .field("ip", &self.ip)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("use_ssl", &self.use_ssl)
            .field("port", &self.port)
            .field("verify_certificates", &self.verify_certificates)
            .field("timeout_secs", &self.timeout_secs)
            .field("skip_upload", &self.skip_upload)
            .field("post_interval_secs", &self.post_interval_secs)
            .field("stale_secs", &self.stale_secs)
            .field("log_success", &self.log_success)
            .field("log_failure", &self.log_failure)
            .finish()
    }
}

impl RainMachineConfig {
    /// Create a configuration for the controller at `ip` with default settings
    #[must_use]
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Default::default()
        }
    }

    /// Port the local API listens on
    #[must_use]
    pub const fn effective_port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None if self.use_ssl => DEFAULT_HTTPS_PORT,
            None => DEFAULT_HTTP_PORT,
        }
    }

    /// URL scheme matching `use_ssl`
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.use_ssl { "https" } else { "http" }
    }

    /// Base URL of the local API, e.g. `https://192.168.1.20:8080`
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = if self.ip.contains(':') && !self.ip.starts_with('[') {
            format!("[{}]", self.ip)
        } else {
            self.ip.clone()
        };
        format!("{}://{}:{}", self.scheme(), host, self.effective_port())
    }

    /// Non-empty access token, if configured
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Non-empty password, if configured
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `RainMachineError::ConfigurationError` if the configuration is invalid.
    pub fn validate(&self) -> Result<(), RainMachineError> {
        let ip = self.ip.trim();
        if ip.is_empty() {
            return Err(RainMachineError::ConfigurationError(
                "ip must not be empty".to_string(),
            ));
        }

        if ip.contains("://") || ip.contains('/') || ip.contains(char::is_whitespace) {
            return Err(RainMachineError::ConfigurationError(format!(
                "ip must be a bare address or host name, got '{}'",
                self.ip
            )));
        }

        if self.token().is_none() && self.password().is_none() {
            return Err(RainMachineError::ConfigurationError(
                "either token or password must be set".to_string(),
            ));
        }

        if self.port == Some(0) {
            return Err(RainMachineError::ConfigurationError(
                "port must be greater than 0".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(RainMachineError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
