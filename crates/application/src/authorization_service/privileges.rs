use crate::{EffectivePrivilege, GrantError};

use super::AuthorizationService;

impl AuthorizationService {
    /// Returns the privilege matrix of the current user's role set.
    ///
    /// GUI clients use this to decide which actions to offer without a
    /// round-trip per action.
    pub fn privileges_for_current_user(&self) -> Result<Vec<EffectivePrivilege>, GrantError> {
        let user = self.current_user()?;
        Ok(self.evaluator.registry().effective_privileges(user.roles()))
    }
}
