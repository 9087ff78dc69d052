//! Session records and the `{id}.{secret}` wire token.

mod manager;
mod memory_store;
mod repository;

use std::fmt;

use chrono::{DateTime, Utc};
pub use manager::{Authenticated, SessionManager};
pub use memory_store::InMemorySessionRepository;
pub use repository::SessionRepository;
use serde::{Deserialize, Serialize};

use crate::crypto::SecretString;

/// A server-side session record.
///
/// Holds a hash of the secret, never the secret itself. The raw secret
/// exists only inside the [`SessionToken`] handed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque random identifier, used as the lookup key.
    pub id: String,
    /// SHA-256 hex digest of the session secret.
    #[serde(skip_serializing)]
    pub secret_hash: String,
    /// The owning user. A user may hold any number of concurrent
    /// sessions (multi-device).
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    /// Watermark advanced on validation once the activity-check
    /// interval has elapsed. Drives both renewal and expiry.
    pub last_verified_at: DateTime<Utc>,
}

/// The client-held credential, wire form `"{id}.{secret}"`.
///
/// Not persisted anywhere. `Debug` redacts the secret half.
#[derive(Clone)]
pub struct SessionToken {
    session_id: String,
    secret: SecretString,
}

impl SessionToken {
    pub(crate) fn new(session_id: String, secret: SecretString) -> Self {
        Self { session_id, secret }
    }

    /// Parses a presented token on the first `.`.
    ///
    /// Returns `None` unless the value is exactly two non-empty parts
    /// around a single delimiter, so malformed tokens are rejected
    /// before any store round-trip.
    pub fn parse(value: &str) -> Option<Self> {
        let (session_id, secret) = value.split_once('.')?;
        if session_id.is_empty() || secret.is_empty() || secret.contains('.') {
            return None;
        }
        Some(Self {
            session_id: session_id.to_owned(),
            secret: SecretString::new(secret),
        })
    }

    /// The session id half, safe to log.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The secret half.
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Renders the value handed to the client, e.g. as a cookie value.
    pub fn as_cookie_value(&self) -> String {
        format!("{}.{}", self.session_id, self.secret.expose_secret())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("session_id", &self.session_id)
            .field("secret", &self.secret)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let token = SessionToken::parse("abc123.supersecret").unwrap();
        assert_eq!(token.session_id(), "abc123");
        assert_eq!(token.secret().expose_secret(), "supersecret");
        assert_eq!(token.as_cookie_value(), "abc123.supersecret");
    }

    #[test]
    fn test_parse_missing_delimiter() {
        assert!(SessionToken::parse("abc123supersecret").is_none());
    }

    #[test]
    fn test_parse_extra_delimiter() {
        assert!(SessionToken::parse("abc.123.secret").is_none());
    }

    #[test]
    fn test_parse_empty_parts() {
        assert!(SessionToken::parse(".secret").is_none());
        assert!(SessionToken::parse("abc123.").is_none());
        assert!(SessionToken::parse(".").is_none());
        assert!(SessionToken::parse("").is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let token = SessionToken::parse("abc123.supersecret").unwrap();
        let debug = format!("{token:?}");
        assert!(debug.contains("abc123"));
        assert!(!debug.contains("supersecret"));
    }
}
