use sebserver_core::UserRole;
use sebserver_domain::{EntityType, PrivilegeLevel, RoleGrant};

/// One declarative row: `(entity type, role, base, institutional, owner)`.
pub type GrantRow = (
    EntityType,
    UserRole,
    PrivilegeLevel,
    PrivilegeLevel,
    PrivilegeLevel,
);

/// Ordered list of grant rows, frozen into a [`crate::GrantRegistry`] once.
///
/// A later row replaces an earlier one with the same `(entity type, role)` key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantTable {
    rows: Vec<RoleGrant>,
}

impl GrantTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from plain tuples.
    #[must_use]
    pub fn from_rows(rows: &[GrantRow]) -> Self {
        Self::from_grants(
            rows.iter()
                .map(|&(entity_type, role, base, institutional, owner)| {
                    RoleGrant::new(entity_type, role, base, institutional, owner)
                }),
        )
    }

    /// Creates a table from already built grant rows.
    #[must_use]
    pub fn from_grants(grants: impl IntoIterator<Item = RoleGrant>) -> Self {
        Self {
            rows: grants.into_iter().collect(),
        }
    }

    /// Appends a row, replacing any earlier row for the same key.
    #[must_use]
    pub fn register(
        self,
        entity_type: EntityType,
        role: UserRole,
        base: PrivilegeLevel,
        institutional: PrivilegeLevel,
        owner: PrivilegeLevel,
    ) -> Self {
        self.with_grant(RoleGrant::new(
            entity_type,
            role,
            base,
            institutional,
            owner,
        ))
    }

    /// Appends a prebuilt row.
    #[must_use]
    pub fn with_grant(mut self, grant: RoleGrant) -> Self {
        self.rows.push(grant);
        self
    }

    /// Returns the rows in registration order.
    #[must_use]
    pub fn rows(&self) -> &[RoleGrant] {
        self.rows.as_slice()
    }

    /// Returns the number of rows, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether no row was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for GrantTable {
    type Item = RoleGrant;
    type IntoIter = std::vec::IntoIter<RoleGrant>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
