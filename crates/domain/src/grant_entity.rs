use sebserver_core::{InstitutionId, UserId};
use serde::{Deserialize, Serialize};

use crate::EntityType;

/// Contract implemented by every domain object that is subject to grant checks.
///
/// The grant engine only ever reads these values; it never owns or persists
/// the entity.
pub trait GrantEntity {
    /// Returns the protected resource kind.
    fn entity_type(&self) -> EntityType;

    /// Returns the institution the entity belongs to.
    fn institution_id(&self) -> InstitutionId;

    /// Returns the owning user, if the entity type has ownership semantics.
    fn owner_id(&self) -> Option<UserId>;

    /// Returns users sharing ownership rights with the owner.
    ///
    /// Only consulted by custom rules such as the exam supporter rule.
    fn supporter_ids(&self) -> &[UserId] {
        &[]
    }
}

impl<T: GrantEntity + ?Sized> GrantEntity for &T {
    fn entity_type(&self) -> EntityType {
        (**self).entity_type()
    }

    fn institution_id(&self) -> InstitutionId {
        (**self).institution_id()
    }

    fn owner_id(&self) -> Option<UserId> {
        (**self).owner_id()
    }

    fn supporter_ids(&self) -> &[UserId] {
        (**self).supporter_ids()
    }
}

/// Plain snapshot of the grant-relevant fields of an entity.
///
/// Useful for callers that only hold keys (e.g. from a list query) and for tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    entity_type: EntityType,
    institution_id: InstitutionId,
    owner_id: Option<UserId>,
    #[serde(default)]
    supporter_ids: Vec<UserId>,
}

impl EntitySnapshot {
    /// Creates an unowned snapshot.
    #[must_use]
    pub fn new(entity_type: EntityType, institution_id: InstitutionId) -> Self {
        Self {
            entity_type,
            institution_id,
            owner_id: None,
            supporter_ids: Vec::new(),
        }
    }

    /// Sets the owning user.
    #[must_use]
    pub fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Sets the supporting users.
    #[must_use]
    pub fn with_supporters(mut self, supporter_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.supporter_ids = supporter_ids.into_iter().collect();
        self
    }
}

impl GrantEntity for EntitySnapshot {
    fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    fn institution_id(&self) -> InstitutionId {
        self.institution_id
    }

    fn owner_id(&self) -> Option<UserId> {
        self.owner_id
    }

    fn supporter_ids(&self) -> &[UserId] {
        self.supporter_ids.as_slice()
    }
}
