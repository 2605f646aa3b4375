use sebserver_core::{InstitutionId, UserId, UserIdentity, UserRole};
use serde::{Deserialize, Serialize};

use crate::{EntityType, GrantEntity, PrivilegeLevel};

/// Privileges one role holds on one entity type, split into three tiers.
///
/// Rows are keyed by `(entity_type, role)` and never change once registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleGrant {
    /// Protected resource kind.
    pub entity_type: EntityType,
    /// Role holding the privileges.
    pub role: UserRole,
    /// System-wide privilege, no institution or ownership restriction.
    #[serde(default)]
    pub base: PrivilegeLevel,
    /// Privilege on entities of the user's own institution.
    #[serde(default)]
    pub institutional: PrivilegeLevel,
    /// Privilege on entities owned by the user.
    #[serde(default)]
    pub owner: PrivilegeLevel,
}

impl RoleGrant {
    /// Creates a grant row.
    #[must_use]
    pub fn new(
        entity_type: EntityType,
        role: UserRole,
        base: PrivilegeLevel,
        institutional: PrivilegeLevel,
        owner: PrivilegeLevel,
    ) -> Self {
        Self {
            entity_type,
            role,
            base,
            institutional,
            owner,
        }
    }

    /// Creates the implicit all-`None` row used when nothing is registered.
    #[must_use]
    pub fn none(entity_type: EntityType, role: UserRole) -> Self {
        Self::new(
            entity_type,
            role,
            PrivilegeLevel::None,
            PrivilegeLevel::None,
            PrivilegeLevel::None,
        )
    }

    /// Returns the `(entity_type, role)` key of this row.
    #[must_use]
    pub fn key(&self) -> (EntityType, UserRole) {
        (self.entity_type, self.role)
    }

    /// Checks the system-wide tier.
    #[must_use]
    pub fn has_base_privilege(&self, requested: PrivilegeLevel) -> bool {
        self.base.implies(requested)
    }

    /// Checks the institutional tier for an entity of `entity_institution`.
    #[must_use]
    pub fn has_institutional_privilege(
        &self,
        requested: PrivilegeLevel,
        user_institution: InstitutionId,
        entity_institution: InstitutionId,
    ) -> bool {
        self.institutional.implies(requested) && user_institution == entity_institution
    }

    /// Checks the ownership tier. An unowned entity never passes.
    ///
    /// The institution is not compared here; ownership alone decides.
    #[must_use]
    pub fn has_owner_privilege(
        &self,
        requested: PrivilegeLevel,
        user_id: UserId,
        owner_id: Option<UserId>,
    ) -> bool {
        self.owner.implies(requested) && owner_id == Some(user_id)
    }

    /// Applies all three tiers to a concrete entity.
    #[must_use]
    pub fn has_privilege(
        &self,
        entity: &dyn GrantEntity,
        user: &UserIdentity,
        requested: PrivilegeLevel,
    ) -> bool {
        self.has_base_privilege(requested)
            || self.has_institutional_privilege(
                requested,
                user.institution_id(),
                entity.institution_id(),
            )
            || self.has_owner_privilege(requested, user.user_id(), entity.owner_id())
    }
}
