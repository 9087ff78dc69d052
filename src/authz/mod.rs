//! Permission requests and the authorization engine.
//!
//! Country-scoped permissions resolve from an attribute on the user
//! record; working-group permissions require a temporally-scoped
//! relationship lookup through [`ContributionRepository`].

mod contribution;
mod engine;

pub use contribution::{
    Contribution, ContributionRepository, InMemoryContributionRepository, WorkingGroupRole,
};
pub use engine::AuthorizationEngine;
use serde::{Deserialize, Serialize};

/// An operation on a protected resource.
///
/// `Confirm` and `EditMetadata` form the management tier: confirming a
/// country's annual report or editing its metadata is restricted to
/// national coordinators, and the working-group equivalents to chairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Read,
    ReadWrite,
    Confirm,
    EditMetadata,
}

impl Action {
    /// Convert to string for storage and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadWrite => "read-write",
            Self::Confirm => "confirm",
            Self::EditMetadata => "edit-metadata",
        }
    }

    /// Parse from a stored string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(Self::Read),
            "read-write" => Some(Self::ReadWrite),
            "confirm" => Some(Self::Confirm),
            "edit-metadata" => Some(Self::EditMetadata),
            _ => None,
        }
    }

    /// Returns true for the confirm/edit-metadata tier.
    pub fn is_management(&self) -> bool {
        matches!(self, Self::Confirm | Self::EditMetadata)
    }
}

/// A permission request, one variant per resource kind.
///
/// Each variant carries only the fields relevant to its kind, so the
/// engine's match is exhaustive and a new resource kind is a compile
/// error everywhere it must be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionRequest {
    /// Site administration. Only the admin role ever passes.
    Admin,
    /// An action on one country's data, identified by ISO alpha-2 code.
    Country { id: String, action: Action },
    /// An action on one working group's data.
    WorkingGroup { id: i64, action: Action },
}

impl PermissionRequest {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Country { .. } => "country",
            Self::WorkingGroup { .. } => "working-group",
        }
    }
}
