use std::sync::Arc;

use sebserver_core::UserIdentity;
use tracing::error;

use crate::{CurrentUserProvider, GrantError, GrantEvaluator};

mod checks;
mod privileges;

/// Request-scoped authorization facade over the grant evaluator.
///
/// Resolves the acting user through [`CurrentUserProvider`] and fails with
/// [`GrantError::MissingIdentity`] when none is bound.
#[derive(Clone)]
pub struct AuthorizationService {
    evaluator: GrantEvaluator,
    user_provider: Arc<dyn CurrentUserProvider>,
}

impl AuthorizationService {
    /// Creates a new authorization service.
    #[must_use]
    pub fn new(evaluator: GrantEvaluator, user_provider: Arc<dyn CurrentUserProvider>) -> Self {
        Self {
            evaluator,
            user_provider,
        }
    }

    /// Returns the underlying evaluator.
    #[must_use]
    pub fn evaluator(&self) -> &GrantEvaluator {
        &self.evaluator
    }

    /// Returns the acting user.
    pub fn current_user(&self) -> Result<UserIdentity, GrantError> {
        self.user_provider.current_user().ok_or_else(|| {
            error!("grant check issued without an authenticated user");
            GrantError::MissingIdentity
        })
    }
}
