//! User store contract.
//!
//! The session and authorization cores never write users; the sign-in
//! and password-change actions are the only consumers of this trait.

use async_trait::async_trait;

use crate::user::User;
use crate::AuthError;

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    async fn update_password(&self, user_id: i64, hashed_password: &str)
        -> Result<(), AuthError>;
}

#[cfg(test)]
pub struct MockUserRepository {
    pub users: std::sync::Mutex<Vec<User>>,
}

#[cfg(test)]
impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: std::sync::Mutex::new(users),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_password(
        &self,
        user_id: i64,
        hashed_password: &str,
    ) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.hashed_password = hashed_password.to_owned();
            user.updated_at = chrono::Utc::now();
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}
