//! Session authentication and temporal authorization for multi-tenant
//! reporting applications.
//!
//! `mandate` is the access-control core of a reporting platform in which
//! countries, institutions and working groups file annual reports. It
//! provides two subsystems behind narrow repository contracts:
//!
//! - **Session lifecycle** ([`SessionManager`]): opaque `{id}.{secret}`
//!   bearer tokens, SHA-256 secret hashing, constant-time verification,
//!   and sliding-window expiry with two independent time thresholds.
//! - **Authorization** ([`AuthorizationEngine`]): resolves a
//!   `(user, resource, action)` triple to allow/deny. Country access is
//!   decided from an attribute on the user record; working-group access
//!   is decided from time-bounded role assignments queried through the
//!   [`ContributionRepository`] contract.
//!
//! Storage is pluggable: implement [`SessionRepository`],
//! [`UserRepository`] and [`ContributionRepository`] against your
//! database. In-memory implementations are provided for tests and
//! single-instance development setups.
//!
//! # Example
//!
//! ```rust,ignore
//! use mandate::{AuthConfig, InMemorySessionRepository, SessionManager};
//!
//! let sessions = SessionManager::new(InMemorySessionRepository::new(), AuthConfig::default());
//! let (session, token) = sessions.create_session(42).await?;
//! // hand token.as_cookie_value() to the client; later:
//! let auth = sessions.validate_session_token(&presented).await?;
//! ```

pub mod actions;
pub mod authz;
pub mod config;
pub mod crypto;
pub mod events;
pub mod repository;
pub mod session;
pub mod user;

pub use authz::{
    Action, AuthorizationEngine, Contribution, ContributionRepository,
    InMemoryContributionRepository, PermissionRequest, WorkingGroupRole,
};
pub use config::AuthConfig;
pub use crypto::SecretString;
pub use events::register_event_listeners;
pub use repository::UserRepository;
pub use session::{
    Authenticated, InMemorySessionRepository, Session, SessionManager, SessionRepository,
    SessionToken,
};
pub use user::{User, UserRole};

#[cfg(test)]
pub use repository::MockUserRepository;

use std::fmt;

/// Errors surfaced by the authentication and authorization core.
///
/// "Not authenticated" is deliberately *not* an error: token validation
/// returns `Ok(None)` for every non-storage failure so that callers branch
/// on nullability for the common case and never learn which part of the
/// token was wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Unknown email or wrong password. The two are indistinguishable.
    InvalidCredentials,
    /// No user record for the given id.
    UserNotFound,
    /// The password collaborator failed to hash or parse a hash.
    PasswordHashError,
    /// An authenticated user does not satisfy the requested action.
    AccessDenied,
    /// A configuration struct failed validation.
    InvalidConfig(&'static str),
    /// A storage backend failure, propagated unchanged. No retries.
    Storage(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::PasswordHashError => write!(f, "Failed to hash password"),
            AuthError::AccessDenied => write!(f, "Access denied"),
            AuthError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            AuthError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}
