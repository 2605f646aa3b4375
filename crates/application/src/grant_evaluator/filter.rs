use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use sebserver_core::UserIdentity;
use sebserver_domain::{EntityType, GrantEntity, PrivilegeLevel, RoleGrant};

use crate::GrantRule;
use crate::grant_rule::evaluate_fail_closed;

use super::GrantEvaluator;

/// Predicate for bulk filtering, resolved once per type, privilege and user.
///
/// Decisions are identical to calling [`GrantEvaluator::has_grant`] per entity.
#[derive(Clone)]
pub struct GrantFilter {
    evaluator: GrantEvaluator,
    entity_type: EntityType,
    requested: PrivilegeLevel,
    user: UserIdentity,
    role_grants: Vec<RoleGrant>,
    rule: Option<Arc<dyn GrantRule>>,
}

impl GrantFilter {
    pub(super) fn new(
        evaluator: GrantEvaluator,
        entity_type: EntityType,
        requested: PrivilegeLevel,
        user: UserIdentity,
    ) -> Self {
        let role_grants = evaluator
            .registry()
            .grants_for_roles(entity_type, user.roles());
        let rule = evaluator.rules.get(entity_type).cloned();

        Self {
            evaluator,
            entity_type,
            requested,
            user,
            role_grants,
            rule,
        }
    }

    /// Returns whether the user holds the requested privilege on `entity`.
    #[must_use]
    pub fn matches(&self, entity: &dyn GrantEntity) -> bool {
        // Entities of another type get the full evaluation.
        if entity.entity_type() != self.entity_type {
            return self.evaluator.has_grant(entity, self.requested, &self.user);
        }

        match &self.rule {
            Some(rule) => evaluate_fail_closed(rule.as_ref(), entity, &self.user, self.requested),
            None => self
                .role_grants
                .iter()
                .any(|grant| grant.has_privilege(entity, &self.user, self.requested)),
        }
    }

    /// Keeps the granted entities, preserving their relative order.
    pub fn filter<E: GrantEntity>(&self, entities: impl IntoIterator<Item = E>) -> Vec<E> {
        entities
            .into_iter()
            .filter(|entity| self.matches(entity))
            .collect()
    }
}

impl Debug for GrantFilter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("GrantFilter")
            .field("entity_type", &self.entity_type)
            .field("requested", &self.requested)
            .field("user_id", &self.user.user_id())
            .field("role_grants", &self.role_grants)
            .field("custom_rule", &self.rule.is_some())
            .finish()
    }
}
