use chrono::{DateTime, Utc};

/// Audit events emitted by the authentication core.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignInSucceeded {
        user_id: i64,
        email: String,
        at: DateTime<Utc>,
    },
    SignInFailed {
        email: String,
        at: DateTime<Utc>,
    },
    SignedOut {
        user_id: i64,
        at: DateTime<Utc>,
    },
    /// A validation attempt found the session past its inactivity
    /// timeout and deleted it.
    SessionExpired {
        user_id: i64,
        at: DateTime<Utc>,
    },
    AllSessionsRevoked {
        user_id: i64,
        at: DateTime<Utc>,
    },
    PasswordChanged {
        user_id: i64,
        at: DateTime<Utc>,
    },
}

impl AuthEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignInSucceeded { .. } => "auth.sign_in.succeeded",
            Self::SignInFailed { .. } => "auth.sign_in.failed",
            Self::SignedOut { .. } => "auth.signed_out",
            Self::SessionExpired { .. } => "auth.session.expired",
            Self::AllSessionsRevoked { .. } => "auth.session.all_revoked",
            Self::PasswordChanged { .. } => "auth.password.changed",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SignInSucceeded { at, .. }
            | Self::SignInFailed { at, .. }
            | Self::SignedOut { at, .. }
            | Self::SessionExpired { at, .. }
            | Self::AllSessionsRevoked { at, .. }
            | Self::PasswordChanged { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            AuthEvent::SignInSucceeded {
                user_id: 1,
                email: "nc@example.org".to_owned(),
                at: now
            }
            .name(),
            "auth.sign_in.succeeded"
        );
        assert_eq!(
            AuthEvent::SignInFailed {
                email: "nc@example.org".to_owned(),
                at: now
            }
            .name(),
            "auth.sign_in.failed"
        );
        assert_eq!(
            AuthEvent::SignedOut {
                user_id: 1,
                at: now
            }
            .name(),
            "auth.signed_out"
        );
        assert_eq!(
            AuthEvent::SessionExpired {
                user_id: 1,
                at: now
            }
            .name(),
            "auth.session.expired"
        );
        assert_eq!(
            AuthEvent::AllSessionsRevoked {
                user_id: 1,
                at: now
            }
            .name(),
            "auth.session.all_revoked"
        );
        assert_eq!(
            AuthEvent::PasswordChanged {
                user_id: 1,
                at: now
            }
            .name(),
            "auth.password.changed"
        );
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = AuthEvent::SignedOut {
            user_id: 1,
            at: now,
        };
        assert_eq!(event.timestamp(), now);
    }
}
