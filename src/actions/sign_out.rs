use chrono::Utc;

use crate::events::{dispatch, AuthEvent};
use crate::session::{Session, SessionManager, SessionRepository};
use crate::AuthError;

/// Deletes the session behind a sign-out request.
pub struct SignOutAction<S: SessionRepository> {
    sessions: SessionManager<S>,
}

impl<S: SessionRepository> SignOutAction<S> {
    pub fn new(sessions: SessionManager<S>) -> Self {
        SignOutAction { sessions }
    }

    /// Signs out the session's owner on this device only. Idempotent.
    pub async fn execute(&self, session: &Session) -> Result<(), AuthError> {
        self.sessions.delete_session(&session.id).await?;

        dispatch(AuthEvent::SignedOut {
            user_id: session.user_id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "mandate::actions",
            "msg=\"sign-out success\" user_id={}",
            session.user_id
        );

        Ok(())
    }
}
