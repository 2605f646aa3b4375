use std::fmt::{Display, Formatter};
use std::str::FromStr;

use sebserver_core::AppError;
use serde::{Deserialize, Serialize};

/// Strength of a privilege, ordered `None < ReadOnly < Modify < Write`.
///
/// A stronger level implies every weaker non-`None` level. `None` implies
/// nothing, not even itself: an unconfigured tier must never satisfy a check,
/// and a request for `None` is never satisfied by any tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeLevel {
    /// No capability configured.
    #[default]
    None,
    /// May view the entity.
    ReadOnly,
    /// May view and edit an existing entity.
    Modify,
    /// May additionally create and delete entities.
    Write,
}

impl PrivilegeLevel {
    /// Returns whether holding `self` satisfies a request for `requested`.
    #[must_use]
    pub fn implies(self, requested: PrivilegeLevel) -> bool {
        self != Self::None && requested != Self::None && requested <= self
    }

    /// Returns a stable storage value for this level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ReadOnly => "read_only",
            Self::Modify => "modify",
            Self::Write => "write",
        }
    }

    /// Returns all levels from weakest to strongest.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PrivilegeLevel] = &[
            PrivilegeLevel::None,
            PrivilegeLevel::ReadOnly,
            PrivilegeLevel::Modify,
            PrivilegeLevel::Write,
        ];

        ALL
    }
}

impl Display for PrivilegeLevel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PrivilegeLevel {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "none" => Ok(Self::None),
            "read_only" => Ok(Self::ReadOnly),
            "modify" => Ok(Self::Modify),
            "write" => Ok(Self::Write),
            _ => Err(AppError::Validation(format!(
                "unknown privilege level '{value}'"
            ))),
        }
    }
}
