use sebserver_domain::{EntityType, GrantEntity, PrivilegeLevel};

use crate::{GrantError, GrantFilter};

use super::AuthorizationService;

impl AuthorizationService {
    /// Returns whether the current user holds `requested` on `entity`.
    pub fn has_grant(
        &self,
        entity: &dyn GrantEntity,
        requested: PrivilegeLevel,
    ) -> Result<bool, GrantError> {
        let user = self.current_user()?;
        Ok(self.evaluator.has_grant(entity, requested, &user))
    }

    /// Returns whether the current user holds `requested` system-wide on a type.
    pub fn has_base_grant(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
    ) -> Result<bool, GrantError> {
        let user = self.current_user()?;
        Ok(self.evaluator.has_base_grant(entity_type, requested, &user))
    }

    /// Returns whether the current user may act on a type within their institution.
    pub fn has_institutional_grant_for_type(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
    ) -> Result<bool, GrantError> {
        let user = self.current_user()?;
        Ok(self
            .evaluator
            .has_institutional_grant_for_type(entity_type, requested, &user))
    }

    /// Returns `entity` when the current user holds `requested` on it.
    pub fn check<'e, E: GrantEntity>(
        &self,
        entity: &'e E,
        requested: PrivilegeLevel,
    ) -> Result<&'e E, GrantError> {
        let user = self.current_user()?;
        self.evaluator.check_grant(entity, requested, &user)
    }

    /// Returns `entity_type` when the current user holds `requested` system-wide.
    pub fn check_for_type(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
    ) -> Result<EntityType, GrantError> {
        let user = self.current_user()?;
        self.evaluator.check_grant_for_type(entity_type, requested, &user)
    }

    /// Shorthand for [`Self::check`] with [`PrivilegeLevel::ReadOnly`].
    pub fn check_read<'e, E: GrantEntity>(&self, entity: &'e E) -> Result<&'e E, GrantError> {
        self.check(entity, PrivilegeLevel::ReadOnly)
    }

    /// Shorthand for [`Self::check`] with [`PrivilegeLevel::Modify`].
    pub fn check_modify<'e, E: GrantEntity>(&self, entity: &'e E) -> Result<&'e E, GrantError> {
        self.check(entity, PrivilegeLevel::Modify)
    }

    /// Shorthand for [`Self::check`] with [`PrivilegeLevel::Write`].
    pub fn check_write<'e, E: GrantEntity>(&self, entity: &'e E) -> Result<&'e E, GrantError> {
        self.check(entity, PrivilegeLevel::Write)
    }

    /// Builds a grant filter for the current user.
    pub fn grant_filter(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
    ) -> Result<GrantFilter, GrantError> {
        let user = self.current_user()?;
        Ok(self.evaluator.grant_filter(entity_type, requested, &user))
    }

    /// Keeps the entities the current user holds `requested` on, in order.
    pub fn filter_granted<E: GrantEntity>(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, GrantError> {
        Ok(self.grant_filter(entity_type, requested)?.filter(entities))
    }
}
