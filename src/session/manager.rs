//! Session lifecycle: creation, validation, deletion.

use chrono::Utc;

use super::repository::SessionRepository;
use super::{Session, SessionToken};
use crate::config::AuthConfig;
use crate::crypto::{constant_time_equal, generate_token, hash_secret, SecretString};
use crate::events::{dispatch, AuthEvent};
use crate::user::User;
use crate::AuthError;

/// A validated `(session, user)` pair.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub session: Session,
    pub user: User,
}

/// Owns the session state machine.
///
/// A session is `Active` until a validation attempt either advances its
/// watermark or finds it past the inactivity timeout and deletes it.
/// There is no background sweep; expiry is enforced lazily, and nothing
/// is cached between requests.
pub struct SessionManager<R: SessionRepository> {
    repository: R,
    config: AuthConfig,
}

impl<R: SessionRepository> SessionManager<R> {
    /// Creates a manager over a session store.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfig` if the configuration fails
    /// [`AuthConfig::validate`].
    pub fn new(repository: R, config: AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;
        Ok(Self { repository, config })
    }

    /// The underlying store, for callers that need direct access.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Creates a session for a user and returns the client-facing token.
    ///
    /// One write to the store. The raw secret is never persisted; only
    /// its SHA-256 digest is.
    pub async fn create_session(
        &self,
        user_id: i64,
    ) -> Result<(Session, SessionToken), AuthError> {
        let id = generate_token(self.config.token_length);
        let secret = SecretString::new(generate_token(self.config.token_length));
        let now = Utc::now();

        let session = Session {
            id: id.clone(),
            secret_hash: hash_secret(secret.expose_secret()),
            user_id,
            created_at: now,
            last_verified_at: now,
        };
        self.repository.insert(session.clone()).await?;

        log::debug!(
            target: "mandate::session",
            "msg=\"session created\" user_id={} session_id={}",
            user_id,
            id
        );

        Ok((session, SessionToken::new(id, secret)))
    }

    /// Validates a presented bearer token.
    ///
    /// Every failure short of a storage error collapses to `Ok(None)`:
    /// malformed token (rejected before any store lookup), unknown id,
    /// expired session (deleted as a side effect), or secret mismatch.
    /// Callers must not be able to tell these apart.
    ///
    /// On success, the renewal watermark is advanced only if the
    /// activity-check interval has elapsed, keeping a store write off
    /// the common path.
    pub async fn validate_session_token(
        &self,
        token: &str,
    ) -> Result<Option<Authenticated>, AuthError> {
        let Some(token) = SessionToken::parse(token) else {
            return Ok(None);
        };

        let Some((mut session, user)) = self.repository.find(token.session_id()).await? else {
            return Ok(None);
        };

        // Expiry is checked before the secret so an expired session is
        // never resurrected, even by a caller holding a valid secret.
        let now = Utc::now();
        let idle = now.signed_duration_since(session.last_verified_at);
        if idle >= self.config.inactivity_timeout {
            self.repository.delete(&session.id).await?;
            log::info!(
                target: "mandate::session",
                "msg=\"session expired\" user_id={} session_id={}",
                session.user_id,
                session.id
            );
            dispatch(AuthEvent::SessionExpired {
                user_id: session.user_id,
                at: now,
            })
            .await;
            return Ok(None);
        }

        let presented_hash = hash_secret(token.secret().expose_secret());
        if !constant_time_equal(presented_hash.as_bytes(), session.secret_hash.as_bytes()) {
            log::warn!(
                target: "mandate::session",
                "msg=\"session secret mismatch\" session_id={}",
                session.id
            );
            return Ok(None);
        }

        if idle >= self.config.activity_check_interval {
            session.last_verified_at = now;
            self.repository
                .update_last_verified_at(&session.id, now)
                .await?;
        }

        Ok(Some(Authenticated { session, user }))
    }

    /// Deletes one session. Idempotent.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), AuthError> {
        self.repository.delete(session_id).await
    }

    /// Deletes every session a user holds, across all devices.
    pub async fn delete_user_sessions(&self, user_id: i64) -> Result<(), AuthError> {
        self.repository.delete_all_for_user(user_id).await?;

        log::info!(
            target: "mandate::session",
            "msg=\"all sessions deleted\" user_id={}",
            user_id
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::session::InMemorySessionRepository;
    use crate::user::UserRole;

    fn manager(config: AuthConfig) -> SessionManager<InMemorySessionRepository> {
        let repo = InMemorySessionRepository::new();
        repo.put_user(User::mock(1, UserRole::Contributor));
        SessionManager::new(repo, config).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_validate() {
        let manager = manager(AuthConfig::default());

        let (session, token) = manager.create_session(1).await.unwrap();
        assert_eq!(session.user_id, 1);

        let auth = manager
            .validate_session_token(&token.as_cookie_value())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(auth.session.id, session.id);
        assert_eq!(auth.user.id, 1);
    }

    #[tokio::test]
    async fn test_secret_never_stored() {
        let manager = manager(AuthConfig::default());

        let (session, token) = manager.create_session(1).await.unwrap();
        let secret = token.secret().expose_secret();
        assert_ne!(session.secret_hash, secret);
        assert_eq!(session.secret_hash, hash_secret(secret));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = AuthConfig {
            activity_check_interval: Duration::days(31),
            ..Default::default()
        };
        assert!(SessionManager::new(InMemorySessionRepository::new(), config).is_err());
    }

    #[tokio::test]
    async fn test_unknown_session_id() {
        let manager = manager(AuthConfig::default());
        let result = manager
            .validate_session_token("unknownsession.somesecret")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_deleted_session_rejected() {
        let manager = manager(AuthConfig::default());

        let (session, token) = manager.create_session(1).await.unwrap();
        manager.delete_session(&session.id).await.unwrap();

        let result = manager
            .validate_session_token(&token.as_cookie_value())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
