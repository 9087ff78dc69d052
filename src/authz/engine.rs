//! The capability-check decision procedure.

use chrono::{NaiveDate, Utc};

use super::contribution::{ContributionRepository, WorkingGroupRole};
use super::{Action, PermissionRequest};
use crate::user::{User, UserRole};
use crate::AuthError;

/// Evaluates permission requests against the role taxonomy.
///
/// Admins bypass everything. For everyone else, country requests are
/// decided from `user.country_id` without touching storage, while
/// working-group requests query the contribution records active on the
/// given date. Passing an explicit date keeps the check pure: the
/// permission state of a past or future report campaign year can be
/// evaluated deterministically.
pub struct AuthorizationEngine<C: ContributionRepository> {
    contributions: C,
}

impl<C: ContributionRepository> AuthorizationEngine<C> {
    /// Creates an engine over a contribution query adapter.
    pub fn new(contributions: C) -> Self {
        Self { contributions }
    }

    /// Decides `(user, request)` as of `on`.
    ///
    /// # Errors
    ///
    /// Only storage failures from the contribution adapter; every
    /// policy outcome is a `bool`.
    pub async fn has_permission(
        &self,
        user: &User,
        request: &PermissionRequest,
        on: NaiveDate,
    ) -> Result<bool, AuthError> {
        if user.is_admin() {
            return Ok(true);
        }

        match request {
            PermissionRequest::Admin => Ok(false),

            PermissionRequest::Country { id, action } => {
                let allowed = match &user.country_id {
                    None => false,
                    Some(country_id) if country_id != id => false,
                    Some(_) => {
                        if action.is_management() {
                            user.role == UserRole::NationalCoordinator
                        } else {
                            matches!(
                                user.role,
                                UserRole::NationalCoordinator | UserRole::Contributor
                            )
                        }
                    }
                };
                Ok(allowed)
            }

            PermissionRequest::WorkingGroup { id, action } => {
                let Some(person_id) = user.person_id else {
                    return Ok(false);
                };

                let roles: &[WorkingGroupRole] = if action.is_management() {
                    &[WorkingGroupRole::Chair]
                } else {
                    &[WorkingGroupRole::Chair, WorkingGroupRole::Member]
                };

                let count = self
                    .contributions
                    .count_active_role_assignments(person_id, *id, roles, on)
                    .await?;
                Ok(count > 0)
            }
        }
    }

    /// [`has_permission`](Self::has_permission) as of today (UTC).
    pub async fn has_permission_now(
        &self,
        user: &User,
        request: &PermissionRequest,
    ) -> Result<bool, AuthError> {
        self.has_permission(user, request, Utc::now().date_naive())
            .await
    }

    /// Like [`has_permission`](Self::has_permission), but denial is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AccessDenied` on deny, so callers can
    /// short-circuit into a redirect or a 403 and keep "unauthorized"
    /// distinct from "unauthenticated".
    pub async fn assert_permission(
        &self,
        user: &User,
        request: &PermissionRequest,
        on: NaiveDate,
    ) -> Result<(), AuthError> {
        if self.has_permission(user, request, on).await? {
            Ok(())
        } else {
            log::info!(
                target: "mandate::authz",
                "msg=\"permission denied\" user_id={} kind={} on={}",
                user.id,
                request.kind(),
                on
            );
            Err(AuthError::AccessDenied)
        }
    }

    /// [`assert_permission`](Self::assert_permission) as of today (UTC).
    pub async fn assert_permission_now(
        &self,
        user: &User,
        request: &PermissionRequest,
    ) -> Result<(), AuthError> {
        self.assert_permission(user, request, Utc::now().date_naive())
            .await
    }
}
