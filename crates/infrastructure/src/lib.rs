//! Infrastructure layer - configuration and logging
//!
//! Loads the forwarder configuration from file and environment and sets up
//! the `tracing` subscriber used by every crate in the workspace.

pub mod config;
pub mod telemetry;

pub use config::{AppConfig, AppConfigError, DeviceConfig, UploadConfig};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
