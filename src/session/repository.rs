//! Session store contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Session;
use crate::user::User;
use crate::AuthError;

/// Repository for session storage.
///
/// The manager re-reads the store on every validation rather than
/// caching, so a revoked session takes effect on the very next request.
/// Implementations provide different backends;
/// [`InMemorySessionRepository`](super::InMemorySessionRepository) covers
/// tests and single-instance deployments.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a freshly created session.
    async fn insert(&self, session: Session) -> Result<(), AuthError>;

    /// Finds a session by id, joined with its owning user.
    async fn find(&self, session_id: &str) -> Result<Option<(Session, User)>, AuthError>;

    /// Advances the renewal watermark.
    ///
    /// Last-write-wins under concurrent validation of the same session;
    /// the watermark only ever moves forward, so no locking is done.
    async fn update_last_verified_at(
        &self,
        session_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthError>;

    /// Deletes a session. Must not error if the session is already gone.
    async fn delete(&self, session_id: &str) -> Result<(), AuthError>;

    /// Deletes every session owned by a user (sign-out everywhere,
    /// credential rotation).
    async fn delete_all_for_user(&self, user_id: i64) -> Result<(), AuthError>;
}
