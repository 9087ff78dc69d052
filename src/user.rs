//! User accounts and application roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application-level role of a user account.
///
/// `Admin` bypasses every permission check. The other two roles are
/// scoped: country access hangs off [`User::country_id`], working-group
/// access off the contribution records linked via [`User::person_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    NationalCoordinator,
    Contributor,
}

impl UserRole {
    /// Convert to string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::NationalCoordinator => "national_coordinator",
            Self::Contributor => "contributor",
        }
    }

    /// Parse from database string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "national_coordinator" => Some(Self::NationalCoordinator),
            "contributor" => Some(Self::Contributor),
            _ => None,
        }
    }
}

/// A user account.
///
/// `country_id` and `person_id` are genuinely optional: a working-group
/// chair may have no country scope, and an account that has never been
/// linked to a person cannot pass any working-group check regardless of
/// role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub role: UserRole,
    /// ISO 3166-1 alpha-2 code of the country this user is scoped to.
    pub country_id: Option<String>,
    /// Links the account to a person participating in working groups.
    pub person_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns true if this user has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
impl User {
    pub fn mock(id: i64, role: UserRole) -> Self {
        let now = Utc::now();
        User {
            id,
            email: format!("user{id}@example.org"),
            name: format!("User {id}"),
            hashed_password: "fakehashedpassword".to_owned(),
            role,
            country_id: None,
            person_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mock_with_country(id: i64, role: UserRole, country_id: &str) -> Self {
        User {
            country_id: Some(country_id.to_owned()),
            ..User::mock(id, role)
        }
    }

    pub fn mock_with_person(id: i64, role: UserRole, person_id: i64) -> Self {
        User {
            person_id: Some(person_id),
            ..User::mock(id, role)
        }
    }
}
