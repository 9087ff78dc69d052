//! Time-bounded role assignments, queried not owned by this crate.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Role a person holds within a working group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingGroupRole {
    #[serde(rename = "wg_chair")]
    Chair,
    #[serde(rename = "wg_member")]
    Member,
}

impl WorkingGroupRole {
    /// Convert to string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chair => "wg_chair",
            Self::Member => "wg_member",
        }
    }

    /// Parse from database string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "wg_chair" => Some(Self::Chair),
            "wg_member" => Some(Self::Member),
            _ => None,
        }
    }
}

/// A person's assignment to a role within a scope, valid over a date
/// range. The same person may hold different roles across groups, or
/// the same group across disjoint ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub id: i64,
    pub person_id: i64,
    pub working_group_id: i64,
    /// Set when the assignment is additionally scoped to a country.
    pub country_id: Option<String>,
    pub role: WorkingGroupRole,
    pub start_date: NaiveDate,
    /// Open-ended when absent.
    pub end_date: Option<NaiveDate>,
}

impl Contribution {
    /// A contribution is active on `date` iff `start_date <= date` and
    /// `end_date` is absent or `>= date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| end >= date)
    }
}

/// Relationship query contract consumed by the authorization engine.
///
/// Answers "does person P hold one of these roles in working group W as
/// of date D?" as a count; any count above zero satisfies the check.
#[async_trait]
pub trait ContributionRepository: Send + Sync {
    async fn count_active_role_assignments(
        &self,
        person_id: i64,
        working_group_id: i64,
        roles: &[WorkingGroupRole],
        on: NaiveDate,
    ) -> Result<u64, AuthError>;
}

/// In-memory contribution records, for tests and development.
#[derive(Clone, Default)]
pub struct InMemoryContributionRepository {
    contributions: Arc<RwLock<Vec<Contribution>>>,
}

impl InMemoryContributionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contribution record.
    pub fn add(&self, contribution: Contribution) {
        if let Ok(mut contributions) = self.contributions.write() {
            contributions.push(contribution);
        }
    }
}

#[async_trait]
impl ContributionRepository for InMemoryContributionRepository {
    async fn count_active_role_assignments(
        &self,
        person_id: i64,
        working_group_id: i64,
        roles: &[WorkingGroupRole],
        on: NaiveDate,
    ) -> Result<u64, AuthError> {
        let contributions = self
            .contributions
            .read()
            .map_err(|_| AuthError::Storage("lock poisoned".to_owned()))?;

        let count = contributions
            .iter()
            .filter(|c| {
                c.person_id == person_id
                    && c.working_group_id == working_group_id
                    && roles.contains(&c.role)
                    && c.is_active_on(on)
            })
            .count();

        Ok(count as u64)
    }
}
