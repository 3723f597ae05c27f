//! RainMachine error types

use thiserror::Error;

/// Errors that can occur while talking to a RainMachine controller
#[derive(Debug, Error)]
pub enum RainMachineError {
    /// Device rejected the credentials or the access token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Device could not be reached (DNS, refused connection, TLS handshake)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete in time
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Device answered with an error status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Device answered with a server error
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Archive record cannot be turned into a payload
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Broad classification used by the forwarder to pick a recovery policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad credentials or expired token; recoverable by logging in again
    Authentication,
    /// Device unreachable or too slow
    Network,
    /// Unexpected status or response shape
    Protocol,
    /// Local problem with configuration or input data
    Local,
}

impl RainMachineError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthenticationFailed(_) => ErrorKind::Authentication,
            Self::ConnectionFailed(_) | Self::Timeout { .. } => ErrorKind::Network,
            Self::RequestFailed(_) | Self::ServiceUnavailable(_) | Self::ParseError(_) => {
                ErrorKind::Protocol
            },
            Self::InvalidRecord(_) | Self::ConfigurationError(_) => ErrorKind::Local,
        }
    }

    /// Returns true if the device rejected the access token or password
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }
}

impl From<domain::DomainError> for RainMachineError {
    fn from(err: domain::DomainError) -> Self {
        Self::InvalidRecord(err.to_string())
    }
}
