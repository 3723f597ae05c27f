//! RainMachine API models
//!
//! Wire types for the local REST API (API version 4).

use serde::{Deserialize, Serialize};

/// RainMachine `statusCode` signalling success
pub const STATUS_OK: i64 = 0;

/// RainMachine `statusCode` signalling a missing or invalid access token
pub const STATUS_NOT_AUTHENTICATED: i64 = 2;

/// Body of `POST /api/4/auth/login`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub pwd: &'a str,
    pub remember: u8,
}

/// Response of `POST /api/4/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, rename = "statusCode")]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{statusCode, message}` reply returned by most endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiStatus {
    #[serde(default, rename = "statusCode")]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/4/parser/data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    /// Observations, one entry per archive record
    pub weather: Vec<WeatherEntry>,
}

impl WeatherPayload {
    /// Wrap a single observation
    #[must_use]
    pub fn single(entry: WeatherEntry) -> Self {
        Self {
            weather: vec![entry],
        }
    }

    /// Whether no entry carries any observation
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weather.iter().all(WeatherEntry::is_empty)
    }
}

/// One observation in RainMachine's weather-parser schema, metric units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherEntry {
    /// Observation time, epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Minimum temperature of the day, °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mintemp: Option<f64>,
    /// Maximum temperature of the day, °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxtemp: Option<f64>,
    /// Current temperature, °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Wind speed, m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<f64>,
    /// Rain since midnight, mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
    /// Relative humidity, %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxrh: Option<f64>,
    /// Barometric pressure, kPa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Dew point, °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dewpoint: Option<f64>,
    /// Evapotranspiration, mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub et: Option<f64>,
}

impl WeatherEntry {
    /// Whether the entry carries no observation (a bare timestamp does not count)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mintemp.is_none()
            && self.maxtemp.is_none()
            && self.temperature.is_none()
            && self.wind.is_none()
            && self.rain.is_none()
            && self.maxrh.is_none()
            && self.pressure.is_none()
            && self.dewpoint.is_none()
            && self.et.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization_skips_missing_fields() {
        let payload = WeatherPayload::single(WeatherEntry {
            timestamp: Some(1_563_362_587),
            temperature: Some(21.5),
            ..Default::default()
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "weather": [{ "timestamp": 1_563_362_587, "temperature": 21.5 }]
            })
        );
    }

    #[test]
    fn test_entry_is_empty() {
        let entry = WeatherEntry {
            timestamp: Some(1),
            ..Default::default()
        };
        assert!(entry.is_empty());
        assert!(WeatherPayload::single(entry).is_empty());

        let entry = WeatherEntry {
            rain: Some(0.0),
            ..Default::default()
        };
        assert!(!entry.is_empty());
    }

    #[test]
    fn test_login_request_shape() {
        let body = serde_json::to_value(LoginRequest {
            pwd: "admin",
            remember: 1,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "pwd": "admin", "remember": 1 }));
    }

    #[test]
    fn test_login_response_parsing() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"access_token": "2e8c", "checksum": "x", "expires_in": 157680000,
                "expiration": "Sat, 17 Jul 2027 10:00:00 GMT", "statusCode": 0}"#,
        )
        .unwrap();
        assert_eq!(response.access_token.as_deref(), Some("2e8c"));
        assert_eq!(response.status_code, Some(STATUS_OK));

        let response: LoginResponse =
            serde_json::from_str(r#"{"statusCode": 2, "message": "Not Authenticated !"}"#).unwrap();
        assert!(response.access_token.is_none());
        assert_eq!(response.status_code, Some(STATUS_NOT_AUTHENTICATED));
    }
}
