use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use sebserver_core::{AppError, AppResult, UserIdentity};
use sebserver_domain::{EntityType, GrantEntity, PrivilegeLevel, RoleGrant};
use tracing::{debug, error};

use crate::GrantRegistry;

/// Custom decision logic replacing the three-tier evaluation for one entity type.
pub trait GrantRule: Send + Sync {
    /// Decides whether `user` holds `requested` on `entity`.
    ///
    /// An `Err` is treated as a denial by the evaluator.
    fn evaluate(
        &self,
        entity: &dyn GrantEntity,
        user: &UserIdentity,
        requested: PrivilegeLevel,
    ) -> AppResult<bool>;
}

struct FnGrantRule<F>(F);

impl<F> GrantRule for FnGrantRule<F>
where
    F: Fn(&dyn GrantEntity, &UserIdentity, PrivilegeLevel) -> AppResult<bool> + Send + Sync,
{
    fn evaluate(
        &self,
        entity: &dyn GrantEntity,
        user: &UserIdentity,
        requested: PrivilegeLevel,
    ) -> AppResult<bool> {
        (self.0)(entity, user, requested)
    }
}

/// Set of custom rules, at most one per entity type.
#[derive(Clone, Default)]
pub struct GrantRules {
    rules: HashMap<EntityType, Arc<dyn GrantRule>>,
}

impl GrantRules {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule for `entity_type`.
    ///
    /// Fails with [`AppError::Conflict`] when the type already has a rule.
    pub fn with_rule(
        mut self,
        entity_type: EntityType,
        rule: impl GrantRule + 'static,
    ) -> AppResult<Self> {
        if self.rules.contains_key(&entity_type) {
            return Err(AppError::Conflict(format!(
                "a custom grant rule is already registered for '{entity_type}'"
            )));
        }

        self.rules.insert(entity_type, Arc::new(rule));
        Ok(self)
    }

    /// Adds a closure rule for `entity_type`.
    pub fn with_rule_fn<F>(self, entity_type: EntityType, rule: F) -> AppResult<Self>
    where
        F: Fn(&dyn GrantEntity, &UserIdentity, PrivilegeLevel) -> AppResult<bool>
            + Send
            + Sync
            + 'static,
    {
        self.with_rule(entity_type, FnGrantRule(rule))
    }

    /// Returns the rule registered for `entity_type`.
    #[must_use]
    pub fn get(&self, entity_type: EntityType) -> Option<&Arc<dyn GrantRule>> {
        self.rules.get(&entity_type)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Debug for GrantRules {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut entity_types: Vec<&EntityType> = self.rules.keys().collect();
        entity_types.sort();
        formatter
            .debug_struct("GrantRules")
            .field("entity_types", &entity_types)
            .finish()
    }
}

/// Three-tier rule for exams whose owner tier also accepts the supporters.
///
/// Exams are shared between an owner and a list of supporting users; every
/// supporter gets the owner privileges of their roles.
#[derive(Debug, Clone)]
pub struct ExamSupporterRule {
    grants: Vec<RoleGrant>,
}

impl ExamSupporterRule {
    /// Snapshots the rows of `entity_type` from the registry.
    #[must_use]
    pub fn for_entity_type(registry: &GrantRegistry, entity_type: EntityType) -> Self {
        Self {
            grants: registry.grants_for_entity_type(entity_type),
        }
    }
}

impl GrantRule for ExamSupporterRule {
    fn evaluate(
        &self,
        entity: &dyn GrantEntity,
        user: &UserIdentity,
        requested: PrivilegeLevel,
    ) -> AppResult<bool> {
        let is_supporter = entity.supporter_ids().contains(&user.user_id());
        let permitting = self
            .grants
            .iter()
            .filter(|grant| user.has_role(grant.role))
            .find(|grant| {
                grant.has_privilege(entity, user, requested)
                    || (is_supporter && grant.owner.implies(requested))
            });

        if let Some(grant) = permitting {
            debug!(
                entity_type = %grant.entity_type,
                role = %grant.role,
                requested = %requested,
                user_id = %user.user_id(),
                supporter = is_supporter,
                "grant permitted by role"
            );
        }

        Ok(permitting.is_some())
    }
}

/// Runs a custom rule, denying when it fails or panics.
pub(crate) fn evaluate_fail_closed(
    rule: &dyn GrantRule,
    entity: &dyn GrantEntity,
    user: &UserIdentity,
    requested: PrivilegeLevel,
) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(entity, user, requested))) {
        Ok(Ok(granted)) => granted,
        Ok(Err(rule_error)) => {
            error!(
                entity_type = %entity.entity_type(),
                user_id = %user.user_id(),
                requested = %requested,
                error = %rule_error,
                "custom grant rule failed, denying"
            );
            false
        }
        Err(_) => {
            error!(
                entity_type = %entity.entity_type(),
                user_id = %user.user_id(),
                requested = %requested,
                "custom grant rule panicked, denying"
            );
            false
        }
    }
}
