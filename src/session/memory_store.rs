//! In-memory session storage.
//!
//! Suitable for development, testing, and single-instance deployments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::repository::SessionRepository;
use super::Session;
use crate::user::User;
use crate::AuthError;

/// In-memory session storage.
///
/// Sessions live in a `HashMap` protected by a `RwLock`, keyed by
/// session id. User records are held alongside so that `find` can
/// return the joined `(Session, User)` pair the way a database adapter
/// would. Everything is lost on process restart.
#[derive(Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    users: Arc<RwLock<HashMap<i64, User>>>,
    find_calls: Arc<AtomicU64>,
}

impl InMemorySessionRepository {
    /// Creates a new in-memory session repository.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            find_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Registers a user record so joined lookups can resolve it.
    pub fn put_user(&self, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id, user);
        }
    }

    /// Returns the number of sessions currently stored.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if there are no sessions stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of times `find` has been called, for asserting that
    /// malformed tokens never reach the store.
    pub fn find_calls(&self) -> u64 {
        self.find_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: Session) -> Result<(), AuthError> {
        self.sessions
            .write()
            .map_err(|_| AuthError::Storage("lock poisoned".to_owned()))?
            .insert(session.id.clone(), session);

        Ok(())
    }

    async fn find(&self, session_id: &str) -> Result<Option<(Session, User)>, AuthError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);

        let sessions = self
            .sessions
            .read()
            .map_err(|_| AuthError::Storage("lock poisoned".to_owned()))?;

        let Some(session) = sessions.get(session_id).cloned() else {
            return Ok(None);
        };

        let users = self
            .users
            .read()
            .map_err(|_| AuthError::Storage("lock poisoned".to_owned()))?;

        Ok(users
            .get(&session.user_id)
            .cloned()
            .map(|user| (session, user)))
    }

    async fn update_last_verified_at(
        &self,
        session_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if let Some(session) = self
            .sessions
            .write()
            .map_err(|_| AuthError::Storage("lock poisoned".to_owned()))?
            .get_mut(session_id)
        {
            session.last_verified_at = at;
        }

        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), AuthError> {
        self.sessions
            .write()
            .map_err(|_| AuthError::Storage("lock poisoned".to_owned()))?
            .remove(session_id);

        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: i64) -> Result<(), AuthError> {
        self.sessions
            .write()
            .map_err(|_| AuthError::Storage("lock poisoned".to_owned()))?
            .retain(|_, session| session.user_id != user_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    fn test_session(id: &str, user_id: i64) -> Session {
        let now = Utc::now();
        Session {
            id: id.to_owned(),
            secret_hash: "0".repeat(64),
            user_id,
            created_at: now,
            last_verified_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_joined() {
        let repo = InMemorySessionRepository::new();
        repo.put_user(User::mock(1, UserRole::Contributor));
        repo.insert(test_session("s1", 1)).await.unwrap();

        let (session, user) = repo.find("s1").await.unwrap().unwrap();
        assert_eq!(session.id, "s1");
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_find_nonexistent() {
        let repo = InMemorySessionRepository::new();
        assert!(repo.find("nope").await.unwrap().is_none());
        assert_eq!(repo.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_find_without_user_record() {
        let repo = InMemorySessionRepository::new();
        repo.insert(test_session("s1", 99)).await.unwrap();

        // session exists but the join target is gone
        assert!(repo.find("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_idempotent() {
        let repo = InMemorySessionRepository::new();
        repo.put_user(User::mock(1, UserRole::Contributor));
        repo.insert(test_session("s1", 1)).await.unwrap();

        repo.delete("s1").await.unwrap();
        assert!(repo.is_empty());
        repo.delete("s1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_all_for_user() {
        let repo = InMemorySessionRepository::new();
        repo.insert(test_session("s1", 1)).await.unwrap();
        repo.insert(test_session("s2", 1)).await.unwrap();
        repo.insert(test_session("s3", 2)).await.unwrap();

        repo.delete_all_for_user(1).await.unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_update_last_verified_at() {
        let repo = InMemorySessionRepository::new();
        repo.put_user(User::mock(1, UserRole::Contributor));
        repo.insert(test_session("s1", 1)).await.unwrap();

        let later = Utc::now() + chrono::Duration::hours(2);
        repo.update_last_verified_at("s1", later).await.unwrap();

        let (session, _) = repo.find("s1").await.unwrap().unwrap();
        assert_eq!(session.last_verified_at, later);
    }
}
