//! Upload policy settings.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Controls which records are uploaded and how outcomes are logged
#[allow(clippy::struct_excessive_bools)] // Configuration needs multiple boolean flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Build payloads but never send them (default: false)
    #[serde(default)]
    pub skip_upload: bool,

    /// Minimum seconds between uploads; 0 uploads every record (default: 0)
    #[serde(default)]
    pub post_interval_secs: u64,

    /// Skip records older than this many seconds (default: unset)
    #[serde(default)]
    pub stale_secs: Option<u64>,

    /// Log successful uploads (default: true)
    #[serde(default = "default_true")]
    pub log_success: bool,

    /// Log failed uploads (default: true)
    #[serde(default = "default_true")]
    pub log_failure: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            skip_upload: false,
            post_interval_secs: 0,
            stale_secs: None,
            log_success: true,
            log_failure: true,
        }
    }
}
