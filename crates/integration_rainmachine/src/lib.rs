//! RainMachine integration
//!
//! Forwards weather-station archive records to a RainMachine smart irrigation
//! controller through its local REST API (API version 4).
//!
//! # Architecture
//!
//! [`RainMachineClient`] defines the two device operations the forwarder
//! needs (login and weather upload) and is implemented by
//! [`HttpRainMachineClient`]. [`RecordForwarder`] owns the client, the
//! immutable [`RainMachineConfig`] and the cached [`AuthSession`], and turns
//! each [`domain::ArchiveRecord`] into at most one upload (two when the access
//! token has to be renewed).
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_rainmachine::{HttpRainMachineClient, RainMachineConfig, RecordForwarder};
//!
//! let config = RainMachineConfig {
//!     password: Some("admin".to_string()),
//!     ..RainMachineConfig::new("192.168.1.20")
//! };
//! let client = HttpRainMachineClient::new(&config)?;
//! let mut forwarder = RecordForwarder::new(client, config);
//!
//! let outcome = forwarder.handle(&record).await;
//! ```

pub mod client;
mod config;
mod error;
mod forwarder;
pub mod mapping;
mod models;
mod session;

pub use client::{HttpRainMachineClient, RainMachineClient};
pub use config::{DEFAULT_HTTP_PORT, DEFAULT_HTTPS_PORT, RainMachineConfig};
pub use error::{ErrorKind, RainMachineError};
pub use forwarder::{ForwardOutcome, RecordForwarder, SkipReason};
pub use mapping::WeatherMapper;
pub use models::{WeatherEntry, WeatherPayload};
pub use session::{AuthSession, SessionSource};
