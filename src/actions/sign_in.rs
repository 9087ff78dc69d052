use chrono::Utc;

use crate::crypto::PasswordHasher;
use crate::events::{dispatch, AuthEvent};
use crate::repository::UserRepository;
use crate::session::{SessionManager, SessionRepository, SessionToken};
use crate::user::User;
use crate::AuthError;

/// Credential sign-in: verify email/password, then open a session.
pub struct SignInAction<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    users: U,
    sessions: SessionManager<S>,
    hasher: H,
}

impl<U, S, H> SignInAction<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    pub fn new(users: U, sessions: SessionManager<S>, hasher: H) -> Self {
        SignInAction {
            users,
            sessions,
            hasher,
        }
    }

    /// Signs a user in.
    ///
    /// # Returns
    ///
    /// - `Ok((user, token))` - session created, hand the token to the client
    /// - `Err(InvalidCredentials)` - unknown email or wrong password,
    ///   indistinguishably
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, SessionToken), AuthError> {
        let user = self.users.find_by_email(email).await?;
        if let Some(user) = user {
            if self.hasher.verify(password, &user.hashed_password)? {
                let (_, token) = self.sessions.create_session(user.id).await?;

                dispatch(AuthEvent::SignInSucceeded {
                    user_id: user.id,
                    email: user.email.clone(),
                    at: Utc::now(),
                })
                .await;

                log::info!(
                    target: "mandate::actions",
                    "msg=\"sign-in success\" user_id={}",
                    user.id
                );

                return Ok((user, token));
            }
        }

        dispatch(AuthEvent::SignInFailed {
            email: email.to_owned(),
            at: Utc::now(),
        })
        .await;

        Err(AuthError::InvalidCredentials)
    }
}
