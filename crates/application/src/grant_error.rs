use sebserver_core::{AppError, UserId};
use sebserver_domain::{EntityType, PrivilegeLevel};
use thiserror::Error;

/// Failures of a grant check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrantError {
    /// No held role grants the requested privilege. Expected and recoverable.
    #[error("permission denied: user '{user_id}' has no {requested} grant on {entity_type}")]
    PermissionDenied {
        /// Entity type the check was made for.
        entity_type: EntityType,
        /// Privilege that was requested.
        requested: PrivilegeLevel,
        /// Acting user.
        user_id: UserId,
    },

    /// The check was issued without an authenticated user. A programming error.
    #[error("no authenticated user identity available for grant check")]
    MissingIdentity,
}

impl GrantError {
    /// Returns whether this is a programming error rather than a denial.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingIdentity)
    }
}

impl From<GrantError> for AppError {
    fn from(error: GrantError) -> Self {
        match error {
            GrantError::PermissionDenied { .. } => AppError::Forbidden(error.to_string()),
            GrantError::MissingIdentity => AppError::Internal(error.to_string()),
        }
    }
}
