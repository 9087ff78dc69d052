//! Configuration for the session lifecycle.
//!
//! The two thresholds are independent: `activity_check_interval` only
//! batches renewal writes, `inactivity_timeout` is the absolute cutoff
//! after which an untouched session is dead. Pass an [`AuthConfig`] into
//! [`SessionManager`](crate::SessionManager) at construction so tests
//! can vary thresholds per case.

use chrono::Duration;

use crate::AuthError;

/// Session timing and token settings.
///
/// # Example
///
/// ```rust
/// use mandate::AuthConfig;
/// use chrono::Duration;
///
/// let config = AuthConfig {
///     activity_check_interval: Duration::minutes(30),
///     inactivity_timeout: Duration::days(14),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Minimum idle time before a successful validation writes a fresh
    /// `last_verified_at`. Shorter than the timeout; exists purely to
    /// keep one store write per request off the hot path.
    ///
    /// Default: 1 hour
    pub activity_check_interval: Duration,

    /// Idle time after which a session is expired and lazily deleted on
    /// the next validation attempt.
    ///
    /// Default: 30 days
    pub inactivity_timeout: Duration,

    /// Length of generated session ids and secrets (in characters).
    ///
    /// Default is 32 alphanumeric characters (~190 bits of entropy).
    pub token_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            activity_check_interval: Duration::hours(1),
            inactivity_timeout: Duration::days(30),
            token_length: 32,
        }
    }
}

impl AuthConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with stricter security settings.
    ///
    /// Short-lived sessions and longer tokens, for deployments where
    /// coordinators sign in from shared machines.
    pub fn strict() -> Self {
        Self {
            activity_check_interval: Duration::minutes(15),
            inactivity_timeout: Duration::days(7),
            token_length: 48,
        }
    }

    /// Creates a configuration suitable for development/testing.
    ///
    /// Frequent renewal writes and a long timeout so local sessions
    /// survive restarts of everything but the store.
    pub fn development() -> Self {
        Self {
            activity_check_interval: Duration::minutes(5),
            inactivity_timeout: Duration::days(90),
            token_length: 32,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfig` if the renewal interval is not
    /// strictly shorter than the inactivity timeout, or if either
    /// threshold is non-positive, or if tokens would be too short to be
    /// unguessable.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.activity_check_interval <= Duration::zero() {
            return Err(AuthError::InvalidConfig(
                "activity_check_interval must be positive",
            ));
        }
        if self.activity_check_interval >= self.inactivity_timeout {
            return Err(AuthError::InvalidConfig(
                "activity_check_interval must be shorter than inactivity_timeout",
            ));
        }
        if self.token_length < 24 {
            return Err(AuthError::InvalidConfig(
                "token_length must be at least 24 characters",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.activity_check_interval, Duration::hours(1));
        assert_eq!(config.inactivity_timeout, Duration::days(30));
        assert_eq!(config.token_length, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = AuthConfig::strict();
        assert_eq!(config.inactivity_timeout, Duration::days(7));
        assert_eq!(config.token_length, 48);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert_eq!(config.activity_check_interval, Duration::minutes(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_interval_not_shorter_than_timeout() {
        let config = AuthConfig {
            activity_check_interval: Duration::days(30),
            inactivity_timeout: Duration::days(30),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(AuthError::InvalidConfig(
                "activity_check_interval must be shorter than inactivity_timeout"
            ))
        );
    }

    #[test]
    fn test_validate_negative_interval() {
        let config = AuthConfig {
            activity_check_interval: Duration::seconds(-1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_short_tokens() {
        let config = AuthConfig {
            token_length: 8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
