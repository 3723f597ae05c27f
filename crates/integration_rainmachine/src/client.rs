//! RainMachine local API client
//!
//! HTTP client for the controller's on-network REST API. Remote Access (the
//! vendor cloud relay) is not supported.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::RainMachineConfig;
use crate::error::RainMachineError;
use crate::models::{
    ApiStatus, LoginRequest, LoginResponse, STATUS_NOT_AUTHENTICATED, STATUS_OK, WeatherPayload,
};

/// Login endpoint
pub const LOGIN_PATH: &str = "/api/4/auth/login";

/// Weather parser data endpoint
pub const WEATHER_PATH: &str = "/api/4/parser/data";

/// `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!("rainmachine-forwarder/", env!("CARGO_PKG_VERSION"));

/// Operations the forwarder needs from a RainMachine controller
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RainMachineClient: Send + Sync {
    /// Exchange the device password for an access token
    async fn login(&self, password: &str) -> Result<String, RainMachineError>;

    /// Upload weather observations
    async fn post_weather(
        &self,
        access_token: &str,
        payload: &WeatherPayload,
    ) -> Result<(), RainMachineError>;
}

/// reqwest-based implementation
#[derive(Debug)]
pub struct HttpRainMachineClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpRainMachineClient {
    /// Create a client for the controller described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &RainMachineConfig) -> Result<Self, RainMachineError> {
        config.validate()?;

        if config.use_ssl && !config.verify_certificates {
            debug!("TLS certificate verification disabled for RainMachine device");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_certificates)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RainMachineError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Map a transport error, stripping the URL (it may carry the access token)
    fn transport_error(&self, err: reqwest::Error) -> RainMachineError {
        let err = err.without_url();
        if err.is_timeout() {
            RainMachineError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else if err.is_connect() {
            RainMachineError::ConnectionFailed(err.to_string())
        } else {
            RainMachineError::RequestFailed(err.to_string())
        }
    }

    /// Map a non-success HTTP status
    fn status_error(status: StatusCode, body: &str) -> RainMachineError {
        let detail = serde_json::from_str::<ApiStatus>(body)
            .ok()
            .and_then(|s| s.message)
            .map(|m| format!("HTTP {status}: {m}"))
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RainMachineError::AuthenticationFailed(detail)
            },
            s if s.is_server_error() => RainMachineError::ServiceUnavailable(detail),
            _ => RainMachineError::RequestFailed(detail),
        }
    }

    /// Interpret the `{statusCode, message}` reply of a successful request
    fn check_api_status(body: &str) -> Result<(), RainMachineError> {
        if body.trim().is_empty() {
            return Ok(());
        }

        let status: ApiStatus = serde_json::from_str(body)
            .map_err(|e| RainMachineError::ParseError(format!("unexpected response: {e}")))?;
        let message = status.message.unwrap_or_default();

        match status.status_code {
            None | Some(STATUS_OK) => Ok(()),
            Some(STATUS_NOT_AUTHENTICATED) => Err(RainMachineError::AuthenticationFailed(message)),
            Some(code) => Err(RainMachineError::RequestFailed(format!(
                "statusCode {code}: {message}"
            ))),
        }
    }
}

#[async_trait]
impl RainMachineClient for HttpRainMachineClient {
    #[instrument(skip(self, password), fields(base_url = %self.base_url))]
    async fn login(&self, password: &str) -> Result<String, RainMachineError> {
        let url = format!("{}{LOGIN_PATH}", self.base_url);
        debug!("Requesting access token");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                pwd: password,
                remember: 1,
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        let login: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| RainMachineError::ParseError(format!("login response: {e}")))?;

        match login.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(token),
            None if login.status_code == Some(STATUS_NOT_AUTHENTICATED) => {
                Err(RainMachineError::AuthenticationFailed(
                    login.message.unwrap_or_else(|| "login rejected".to_string()),
                ))
            },
            None => {
                warn!(status_code = ?login.status_code, "Login response without access token");
                Err(RainMachineError::ParseError(
                    "login response carries no access_token".to_string(),
                ))
            },
        }
    }

    #[instrument(skip(self, access_token, payload), fields(base_url = %self.base_url, entries = payload.weather.len()))]
    async fn post_weather(
        &self,
        access_token: &str,
        payload: &WeatherPayload,
    ) -> Result<(), RainMachineError> {
        let url = format!("{}{WEATHER_PATH}", self.base_url);
        debug!("Uploading weather data");

        let response = self
            .client
            .post(&url)
            .query(&[("access_token", access_token)])
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        Self::check_api_status(&body)
    }
}
