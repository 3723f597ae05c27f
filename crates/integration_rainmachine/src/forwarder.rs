//! Record forwarder
//!
//! Receives archive records one at a time, maps them to the RainMachine
//! weather schema and uploads them. Holds the only auth session; an access
//! token rejected by the device triggers exactly one re-login and one retried
//! upload before the record is dropped. There is no retry queue: weather data
//! is periodic and the next record supersedes a lost one.

use chrono::{DateTime, Utc};
use domain::ArchiveRecord;
use tracing::{debug, error, info, instrument, warn};

use crate::client::RainMachineClient;
use crate::config::RainMachineConfig;
use crate::error::RainMachineError;
use crate::mapping::WeatherMapper;
use crate::models::WeatherPayload;
use crate::session::AuthSession;

/// Why a record was not uploaded even though nothing failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Record is older than the configured staleness limit
    Stale {
        /// Age of the record in seconds
        age_secs: i64,
    },
    /// Record arrived within the post interval of the last upload
    TooSoon {
        /// Seconds since the last uploaded record
        elapsed_secs: i64,
    },
    /// Record carries none of the forwarded fields
    NoData,
    /// Uploads are disabled by configuration
    UploadDisabled,
}

/// Result of handling one record
#[derive(Debug)]
pub enum ForwardOutcome {
    /// Payload accepted by the device
    Posted {
        /// The cached token was rejected and replaced during this upload
        reauthenticated: bool,
    },
    /// Record intentionally not uploaded
    Skipped(SkipReason),
    /// Upload failed; the record is lost
    Dropped(RainMachineError),
}

impl ForwardOutcome {
    /// Whether the payload reached the device
    #[must_use]
    pub const fn is_posted(&self) -> bool {
        matches!(self, Self::Posted { .. })
    }

    /// Whether the record was lost to an error
    #[must_use]
    pub const fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }
}

/// Forwards archive records to a single RainMachine controller
#[derive(Debug)]
pub struct RecordForwarder<C> {
    client: C,
    config: RainMachineConfig,
    session: Option<AuthSession>,
    mapper: WeatherMapper,
    last_posted: Option<DateTime<Utc>>,
}

impl<C: RainMachineClient> RecordForwarder<C> {
    /// Create a forwarder; a configured token seeds the session
    pub fn new(client: C, config: RainMachineConfig) -> Self {
        let session = config
            .token()
            .map(|token| AuthSession::configured(token.to_string(), Utc::now()));

        Self {
            client,
            config,
            session,
            mapper: WeatherMapper::new(),
            last_posted: None,
        }
    }

    /// Configuration this forwarder was built with
    pub const fn config(&self) -> &RainMachineConfig {
        &self.config
    }

    /// Current auth session, if any
    pub const fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Forward one archive record
    pub async fn handle(&mut self, record: &ArchiveRecord) -> ForwardOutcome {
        self.handle_at(record, Utc::now()).await
    }

    /// Forward one archive record, using `now` as the current time
    #[instrument(skip(self, record), fields(timestamp = record.timestamp()))]
    pub async fn handle_at(&mut self, record: &ArchiveRecord, now: DateTime<Utc>) -> ForwardOutcome {
        let outcome = self.forward(record, now).await;

        match &outcome {
            ForwardOutcome::Posted { reauthenticated } => {
                if self.config.log_success {
                    info!(reauthenticated, "Published record to RainMachine");
                }
            },
            ForwardOutcome::Skipped(reason) => {
                debug!(?reason, extremes = ?self.mapper.extremes(), "Record not published");
            },
            ForwardOutcome::Dropped(err) => {
                if self.config.log_failure {
                    error!(error = %err, kind = ?err.kind(), "Failed to publish record, dropping it");
                }
            },
        }

        outcome
    }

    async fn forward(&mut self, record: &ArchiveRecord, now: DateTime<Utc>) -> ForwardOutcome {
        let observed_at = match record.date_time() {
            Ok(at) => at.unwrap_or(now),
            Err(e) => return ForwardOutcome::Dropped(e.into()),
        };

        // Every decodable record feeds the daily extremes, posted or not
        let payload = match self.mapper.map(record, now) {
            Ok(payload) => payload,
            Err(e) => return ForwardOutcome::Dropped(e),
        };

        if let Some(reason) = self.gate(observed_at, now) {
            return ForwardOutcome::Skipped(reason);
        }

        if payload.is_empty() {
            return ForwardOutcome::Skipped(SkipReason::NoData);
        }

        if self.config.skip_upload {
            info!(
                payload = %serde_json::to_string(&payload).unwrap_or_default(),
                "Skipping upload"
            );
            return ForwardOutcome::Skipped(SkipReason::UploadDisabled);
        }

        match self.deliver(&payload).await {
            Ok(reauthenticated) => {
                self.last_posted = Some(observed_at);
                ForwardOutcome::Posted { reauthenticated }
            },
            Err(e) => ForwardOutcome::Dropped(e),
        }
    }

    /// Staleness and post-interval checks
    ///
    /// `at` is the record time, or `now` for records without `dateTime`.
    fn gate(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> Option<SkipReason> {
        if let Some(stale_secs) = self.config.stale_secs {
            let age_secs = (now - at).num_seconds();
            if age_secs > i64::try_from(stale_secs).unwrap_or(i64::MAX) {
                return Some(SkipReason::Stale { age_secs });
            }
        }

        let interval_secs = i64::try_from(self.config.post_interval_secs).unwrap_or(i64::MAX);
        if let Some(last) = self.last_posted.filter(|_| interval_secs > 0) {
            let elapsed_secs = (at - last).num_seconds();
            if elapsed_secs < interval_secs {
                return Some(SkipReason::TooSoon { elapsed_secs });
            }
        }

        None
    }

    /// Upload with at most one re-authentication
    ///
    /// Returns whether a re-authentication took place.
    async fn deliver(&mut self, payload: &WeatherPayload) -> Result<bool, RainMachineError> {
        let token = self.ensure_session().await?;

        match self.client.post_weather(&token, payload).await {
            Ok(()) => Ok(false),
            Err(e) if e.is_authentication_failure() => {
                warn!(error = %e, "Access token rejected, logging in again");
                self.session = None;
                let token = self.login().await?;
                if let Err(e) = self.client.post_weather(&token, payload).await {
                    if e.is_authentication_failure() {
                        self.session = None;
                    }
                    return Err(e);
                }
                Ok(true)
            },
            Err(e) => Err(e),
        }
    }

    /// Token of the cached session, logging in when there is none
    async fn ensure_session(&mut self) -> Result<String, RainMachineError> {
        match &self.session {
            Some(session) => Ok(session.access_token().to_string()),
            None => self.login().await,
        }
    }

    async fn login(&mut self) -> Result<String, RainMachineError> {
        let password = self.config.password().ok_or_else(|| {
            RainMachineError::AuthenticationFailed(
                "no password configured to obtain a new access token".to_string(),
            )
        })?;

        let token = self.client.login(password).await?;
        debug!("Obtained new access token");
        self.session = Some(AuthSession::from_login(token.clone(), Utc::now()));
        Ok(token)
    }
}
