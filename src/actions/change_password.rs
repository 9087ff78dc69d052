use chrono::Utc;

use crate::crypto::PasswordHasher;
use crate::events::{dispatch, AuthEvent};
use crate::repository::UserRepository;
use crate::session::{SessionManager, SessionRepository};
use crate::AuthError;

/// Rotates a user's password and revokes every open session.
///
/// Revoking sessions on rotation means a stolen token dies with the old
/// credential; the user signs back in on each device.
pub struct ChangePasswordAction<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    users: U,
    sessions: SessionManager<S>,
    hasher: H,
}

impl<U, S, H> ChangePasswordAction<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    pub fn new(users: U, sessions: SessionManager<S>, hasher: H) -> Self {
        ChangePasswordAction {
            users,
            sessions,
            hasher,
        }
    }

    /// Changes the password after verifying the current one.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - password updated, all sessions revoked
    /// - `Err(UserNotFound)` - no such user
    /// - `Err(InvalidCredentials)` - current password wrong
    pub async fn execute(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.hasher.verify(current_password, &user.hashed_password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let hashed = self.hasher.hash(new_password)?;
        self.users.update_password(user_id, &hashed).await?;
        self.sessions.delete_user_sessions(user_id).await?;

        let now = Utc::now();
        dispatch(AuthEvent::PasswordChanged {
            user_id,
            at: now,
        })
        .await;
        dispatch(AuthEvent::AllSessionsRevoked {
            user_id,
            at: now,
        })
        .await;

        log::info!(
            target: "mandate::actions",
            "msg=\"password changed, sessions revoked\" user_id={}",
            user_id
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::crypto::Argon2Hasher;
    use crate::repository::MockUserRepository;
    use crate::session::InMemorySessionRepository;
    use crate::user::{User, UserRole};

    #[tokio::test]
    async fn test_change_password_revokes_sessions() {
        let hasher = Argon2Hasher::default();
        let mut user = User::mock(1, UserRole::Contributor);
        user.hashed_password = hasher.hash("oldpassword").unwrap();

        let session_repo = InMemorySessionRepository::new();
        session_repo.put_user(user.clone());
        let manager = SessionManager::new(session_repo.clone(), AuthConfig::default()).unwrap();

        // two devices
        manager.create_session(1).await.unwrap();
        manager.create_session(1).await.unwrap();
        assert_eq!(session_repo.len(), 2);

        let users = MockUserRepository::with_users(vec![user]);
        let action = ChangePasswordAction::new(users, manager, hasher.clone());

        action.execute(1, "oldpassword", "newpassword").await.unwrap();
        assert!(session_repo.is_empty());

        let stored = action.users.find_by_id(1).await.unwrap().unwrap();
        assert!(hasher.verify("newpassword", &stored.hashed_password).unwrap());
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let hasher = Argon2Hasher::default();
        let mut user = User::mock(1, UserRole::Contributor);
        user.hashed_password = hasher.hash("oldpassword").unwrap();

        let manager =
            SessionManager::new(InMemorySessionRepository::new(), AuthConfig::default()).unwrap();
        let action =
            ChangePasswordAction::new(MockUserRepository::with_users(vec![user]), manager, hasher);

        let result = action.execute(1, "notmypassword", "newpassword").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_change_password_unknown_user() {
        let hasher = Argon2Hasher::default();
        let manager =
            SessionManager::new(InMemorySessionRepository::new(), AuthConfig::default()).unwrap();
        let action = ChangePasswordAction::new(MockUserRepository::new(), manager, hasher);

        let result = action.execute(99, "whatever", "newpassword").await;
        assert_eq!(result.unwrap_err(), AuthError::UserNotFound);
    }
}
