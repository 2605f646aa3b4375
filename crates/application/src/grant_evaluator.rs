use std::sync::Arc;

use sebserver_core::{AppResult, UserIdentity};
use sebserver_domain::{EntityType, GrantEntity, PrivilegeLevel};
use tracing::{debug, warn};

use crate::grant_rule::evaluate_fail_closed;
use crate::{ExamSupporterRule, GrantError, GrantRegistry, GrantRules, default_grant_table};

mod filter;

pub use filter::GrantFilter;

/// Decides permit or deny for a user, an entity (or entity type) and a privilege.
///
/// Pure and lock-free over state frozen at construction; clones share that state.
#[derive(Debug, Clone)]
pub struct GrantEvaluator {
    registry: Arc<GrantRegistry>,
    rules: Arc<GrantRules>,
}

impl GrantEvaluator {
    /// Creates an evaluator over a frozen registry and custom rule set.
    #[must_use]
    pub fn new(registry: GrantRegistry, rules: GrantRules) -> Self {
        Self {
            registry: Arc::new(registry),
            rules: Arc::new(rules),
        }
    }

    /// Creates the evaluator for the built-in matrix with its exam supporter rule.
    pub fn standard() -> AppResult<Self> {
        let registry = GrantRegistry::from_table(default_grant_table());
        let rules = GrantRules::new().with_rule(
            EntityType::Exam,
            ExamSupporterRule::for_entity_type(&registry, EntityType::Exam),
        )?;

        Ok(Self::new(registry, rules))
    }

    /// Returns the registry this evaluator reads.
    #[must_use]
    pub fn registry(&self) -> &GrantRegistry {
        self.registry.as_ref()
    }

    /// Returns whether any held role grants `requested` on `entity`.
    ///
    /// A custom rule registered for the entity type replaces the three tiers.
    #[must_use]
    pub fn has_grant(
        &self,
        entity: &dyn GrantEntity,
        requested: PrivilegeLevel,
        user: &UserIdentity,
    ) -> bool {
        match self.rules.get(entity.entity_type()) {
            Some(rule) => evaluate_fail_closed(rule.as_ref(), entity, user, requested),
            None => self.has_tier_grant(entity, requested, user),
        }
    }

    /// Returns whether any held role grants `requested` system-wide on a type.
    ///
    /// Used before an instance exists; institution, ownership and custom rules
    /// do not apply.
    #[must_use]
    pub fn has_base_grant(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
        user: &UserIdentity,
    ) -> bool {
        user.roles().any(|role| {
            self.registry
                .lookup(entity_type, role)
                .is_some_and(|grant| grant.has_base_privilege(requested))
        })
    }

    /// Returns whether the user may act on entities of a type in their own
    /// institution, e.g. to create one.
    #[must_use]
    pub fn has_institutional_grant_for_type(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
        user: &UserIdentity,
    ) -> bool {
        user.roles().any(|role| {
            self.registry.lookup(entity_type, role).is_some_and(|grant| {
                grant.has_base_privilege(requested) || grant.institutional.implies(requested)
            })
        })
    }

    /// Returns `entity` unchanged when granted, a denial otherwise.
    pub fn check_grant<'e, E: GrantEntity>(
        &self,
        entity: &'e E,
        requested: PrivilegeLevel,
        user: &UserIdentity,
    ) -> Result<&'e E, GrantError> {
        if self.has_grant(entity, requested, user) {
            return Ok(entity);
        }

        Err(denied(entity.entity_type(), requested, user))
    }

    /// Returns `entity_type` unchanged when the base tier grants it.
    pub fn check_grant_for_type(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
        user: &UserIdentity,
    ) -> Result<EntityType, GrantError> {
        if self.has_base_grant(entity_type, requested, user) {
            return Ok(entity_type);
        }

        Err(denied(entity_type, requested, user))
    }

    /// Builds a reusable predicate equivalent to [`Self::has_grant`].
    #[must_use]
    pub fn grant_filter(
        &self,
        entity_type: EntityType,
        requested: PrivilegeLevel,
        user: &UserIdentity,
    ) -> GrantFilter {
        GrantFilter::new(self.clone(), entity_type, requested, user.clone())
    }

    fn has_tier_grant(
        &self,
        entity: &dyn GrantEntity,
        requested: PrivilegeLevel,
        user: &UserIdentity,
    ) -> bool {
        let entity_type = entity.entity_type();
        user.roles().any(|role| {
            let granted = self
                .registry
                .lookup(entity_type, role)
                .is_some_and(|grant| grant.has_privilege(entity, user, requested));
            if granted {
                debug!(
                    entity_type = %entity_type,
                    role = %role,
                    requested = %requested,
                    user_id = %user.user_id(),
                    "grant permitted by role"
                );
            }
            granted
        })
    }
}

fn denied(entity_type: EntityType, requested: PrivilegeLevel, user: &UserIdentity) -> GrantError {
    warn!(
        entity_type = %entity_type,
        requested = %requested,
        user_id = %user.user_id(),
        username = %user.username(),
        "permission denied"
    );

    GrantError::PermissionDenied {
        entity_type,
        requested,
        user_id: user.user_id(),
    }
}

#[cfg(test)]
mod tests;
