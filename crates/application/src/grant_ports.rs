use sebserver_core::{AppResult, UserIdentity};

use crate::GrantTable;

/// Port resolving the authenticated user of the current request.
pub trait CurrentUserProvider: Send + Sync {
    /// Returns the current user, or `None` when no identity is bound.
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Port supplying the grant table at startup.
pub trait GrantTableSource: Send + Sync {
    /// Loads the full table.
    fn load(&self) -> AppResult<GrantTable>;
}
