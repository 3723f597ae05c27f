//! Cached authentication session

use chrono::{DateTime, Utc};

/// How the session token was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Pre-issued token taken from configuration
    Configured,
    /// Token returned by a login call
    Login,
}

/// Access token currently in use
///
/// The token is never exposed through `Debug`.
#[derive(Clone)]
pub struct AuthSession {
    access_token: String,
    obtained_at: DateTime<Utc>,
    source: SessionSource,
}

impl AuthSession {
    /// Session for a token returned by the login endpoint
    #[must_use]
    pub fn from_login(access_token: String, obtained_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            obtained_at,
            source: SessionSource::Login,
        }
    }

    /// Session seeded from a configured token
    #[must_use]
    pub fn configured(access_token: String, obtained_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            obtained_at,
            source: SessionSource::Configured,
        }
    }

    /// The bearer token
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// When the token was obtained
    #[must_use]
    pub const fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }

    /// Where the token came from
    #[must_use]
    pub const fn source(&self) -> SessionSource {
        self.source
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("obtained_at", &self.obtained_at)
            .field("source", &self.source)
            .finish()
    }
}
