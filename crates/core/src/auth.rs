use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AppError, InstitutionId, UserId};

/// Roles assignable to an authenticated actor.
///
/// A user may hold several roles at once; grants are the union over all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// System-wide administrator of the whole server.
    SebServerAdmin,
    /// Administrator of one institution.
    InstitutionalAdmin,
    /// Sets up and runs exams of an institution.
    ExamAdmin,
    /// Supports exams they are assigned to.
    ExamSupporter,
    /// Teacher accessing own exams through an LMS integration.
    Teacher,
}

impl UserRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SebServerAdmin => "seb_server_admin",
            Self::InstitutionalAdmin => "institutional_admin",
            Self::ExamAdmin => "exam_admin",
            Self::ExamSupporter => "exam_supporter",
            Self::Teacher => "teacher",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[UserRole] = &[
            UserRole::SebServerAdmin,
            UserRole::InstitutionalAdmin,
            UserRole::ExamAdmin,
            UserRole::ExamSupporter,
            UserRole::Teacher,
        ];

        ALL
    }
}

impl Display for UserRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "seb_server_admin" => Ok(Self::SebServerAdmin),
            "institutional_admin" => Ok(Self::InstitutionalAdmin),
            "exam_admin" => Ok(Self::ExamAdmin),
            "exam_supporter" => Ok(Self::ExamSupporter),
            "teacher" => Ok(Self::Teacher),
            _ => Err(AppError::Validation(format!("unknown user role '{value}'"))),
        }
    }
}

/// Resolved identity of the actor a grant check is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: UserId,
    username: String,
    institution_id: InstitutionId,
    roles: BTreeSet<UserRole>,
}

impl UserIdentity {
    /// Creates a user identity from authentication and institution data.
    #[must_use]
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        institution_id: InstitutionId,
        roles: impl IntoIterator<Item = UserRole>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            institution_id,
            roles: roles.into_iter().collect(),
        }
    }

    /// Returns the user account id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the login name, used for diagnostics only.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the institution the user belongs to.
    #[must_use]
    pub fn institution_id(&self) -> InstitutionId {
        self.institution_id
    }

    /// Returns the held roles in stable order.
    pub fn roles(&self) -> impl Iterator<Item = UserRole> + '_ {
        self.roles.iter().copied()
    }

    /// Returns whether the user holds the role.
    #[must_use]
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }
}
