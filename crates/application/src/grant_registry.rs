use std::collections::HashMap;

use sebserver_core::UserRole;
use sebserver_domain::{EntityType, PrivilegeLevel, RoleGrant};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::GrantTable;

/// Immutable lookup of [`RoleGrant`] rows by `(entity type, role)`.
///
/// Built once at startup; safe to share between threads for reads.
#[derive(Debug, Clone, Default)]
pub struct GrantRegistry {
    grants: HashMap<(EntityType, UserRole), RoleGrant>,
}

impl GrantRegistry {
    /// Freezes a grant table. Later rows win over earlier rows with the same key.
    #[must_use]
    pub fn from_table(table: GrantTable) -> Self {
        let declared_rows = table.len();
        let grants: HashMap<_, _> = table
            .into_iter()
            .map(|grant| (grant.key(), grant))
            .collect();

        debug!(
            declared_rows,
            registered_grants = grants.len(),
            "grant registry built"
        );

        Self { grants }
    }

    /// Returns the registered row, if any.
    #[must_use]
    pub fn lookup(&self, entity_type: EntityType, role: UserRole) -> Option<&RoleGrant> {
        self.grants.get(&(entity_type, role))
    }

    /// Returns the registered row or the implicit all-`None` row.
    #[must_use]
    pub fn grant_or_none(&self, entity_type: EntityType, role: UserRole) -> RoleGrant {
        self.lookup(entity_type, role)
            .copied()
            .unwrap_or_else(|| RoleGrant::none(entity_type, role))
    }

    /// Returns all rows registered for one entity type, ordered by role.
    #[must_use]
    pub fn grants_for_entity_type(&self, entity_type: EntityType) -> Vec<RoleGrant> {
        let mut grants: Vec<RoleGrant> = self
            .grants
            .values()
            .filter(|grant| grant.entity_type == entity_type)
            .copied()
            .collect();
        grants.sort_by_key(|grant| grant.role);
        grants
    }

    /// Returns the rows of `entity_type` registered for any of `roles`.
    #[must_use]
    pub fn grants_for_roles(
        &self,
        entity_type: EntityType,
        roles: impl IntoIterator<Item = UserRole>,
    ) -> Vec<RoleGrant> {
        roles
            .into_iter()
            .filter_map(|role| self.lookup(entity_type, role).copied())
            .collect()
    }

    /// Returns the union of privileges a role set holds, per entity type.
    ///
    /// Entity types without any privilege for the role set are omitted.
    #[must_use]
    pub fn effective_privileges(
        &self,
        roles: impl IntoIterator<Item = UserRole>,
    ) -> Vec<EffectivePrivilege> {
        let roles: Vec<UserRole> = roles.into_iter().collect();

        EntityType::all()
            .iter()
            .map(|entity_type| {
                self.grants_for_roles(*entity_type, roles.iter().copied())
                    .into_iter()
                    .fold(
                        EffectivePrivilege::none(*entity_type),
                        EffectivePrivilege::union,
                    )
            })
            .filter(EffectivePrivilege::has_any)
            .collect()
    }

    /// Iterates over all registered rows in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleGrant> {
        self.grants.values()
    }

    /// Returns the number of registered rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Returns whether no row is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

/// Strongest privilege per tier a role set holds on one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePrivilege {
    /// Protected resource kind.
    pub entity_type: EntityType,
    /// System-wide tier.
    pub base: PrivilegeLevel,
    /// Same-institution tier.
    pub institutional: PrivilegeLevel,
    /// Ownership tier.
    pub owner: PrivilegeLevel,
}

impl EffectivePrivilege {
    fn none(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            base: PrivilegeLevel::None,
            institutional: PrivilegeLevel::None,
            owner: PrivilegeLevel::None,
        }
    }

    fn union(self, grant: RoleGrant) -> Self {
        Self {
            entity_type: self.entity_type,
            base: self.base.max(grant.base),
            institutional: self.institutional.max(grant.institutional),
            owner: self.owner.max(grant.owner),
        }
    }

    /// Returns whether any tier is configured.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.base != PrivilegeLevel::None
            || self.institutional != PrivilegeLevel::None
            || self.owner != PrivilegeLevel::None
    }
}
