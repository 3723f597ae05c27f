//! RainMachine device connection settings.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Connection settings for the RainMachine controller
///
/// Mirrors the keys of the weewx `[[RainMachine]]` section (`ip`, `token`,
/// `usessl`) plus the options needed to obtain tokens and reach the device.
#[derive(Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// IP address or host name of the controller
    #[serde(default)]
    pub ip: String,

    /// Pre-issued access token (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    /// Device password used to obtain new tokens (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,

    /// Use HTTPS (default: true)
    #[serde(default = "default_true", rename = "usessl", alias = "use_ssl")]
    pub use_ssl: bool,

    /// Port override (default: 8080 with HTTPS, 8081 without)
    #[serde(default)]
    pub port: Option<u16>,

    /// Verify the device certificate (default: false)
    #[serde(default)]
    pub verify_certificates: bool,

    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_device_timeout")]
    pub timeout_secs: u64,
}

const fn default_device_timeout() -> u64 {
    60
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            ip: String::new(),
            token: None,
            password: None,
            use_ssl: true,
            port: None,
            verify_certificates: false,
            timeout_secs: default_device_timeout(),
        }
    }
}

impl std::fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("ip", &self.ip)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("use_ssl", &self.use_ssl)
            .field("port", &self.port)
            .field("verify_certificates", &self.verify_certificates)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DeviceConfig {
    /// Get the token as a string reference
    #[must_use]
    pub fn token_str(&self) -> Option<&str> {
        self.token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Get the password as a string reference
    #[must_use]
    pub fn password_str(&self) -> Option<&str> {
        self.password.as_ref().map(ExposeSecret::expose_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeviceConfig::default();
        assert!(config.use_ssl);
        assert!(config.port.is_none());
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_deserialize_weewx_keys() {
        let config: DeviceConfig =
            serde_json::from_str(r#"{"ip": "10.0.0.2", "token": "abc", "usessl": false}"#).unwrap();
        assert_eq!(config.ip, "10.0.0.2");
        assert_eq!(config.token_str(), Some("abc"));
        assert!(config.password_str().is_none());
        assert!(!config.use_ssl);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config: DeviceConfig =
            serde_json::from_str(r#"{"ip": "10.0.0.2", "password": "hunter2"}"#).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
    }
}
