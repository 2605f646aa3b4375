//! Current user provider bound to one fixed identity.

use sebserver_application::CurrentUserProvider;
use sebserver_core::UserIdentity;

/// Resolves the same identity for every request.
///
/// Used by tooling and tests where no authentication layer runs.
#[derive(Debug, Clone, Default)]
pub struct StaticCurrentUserProvider {
    user: Option<UserIdentity>,
}

impl StaticCurrentUserProvider {
    /// Creates a provider that always resolves `user`.
    #[must_use]
    pub fn signed_in(user: UserIdentity) -> Self {
        Self { user: Some(user) }
    }

    /// Creates a provider without an identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl CurrentUserProvider for StaticCurrentUserProvider {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use sebserver_application::CurrentUserProvider;
    use sebserver_core::{InstitutionId, UserId, UserIdentity, UserRole};

    use super::StaticCurrentUserProvider;

    #[test]
    fn anonymous_provider_has_no_user() {
        assert!(StaticCurrentUserProvider::anonymous().current_user().is_none());
    }

    #[test]
    fn signed_in_provider_returns_identity() {
        let identity = UserIdentity::new(
            UserId::new(),
            "admin",
            InstitutionId::new(1),
            [UserRole::SebServerAdmin],
        );
        let provider = StaticCurrentUserProvider::signed_in(identity.clone());

        assert_eq!(provider.current_user(), Some(identity));
    }
}
