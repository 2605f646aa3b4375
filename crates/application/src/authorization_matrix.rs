//! Built-in authorization matrix of the server.

use sebserver_core::UserRole::{
    ExamAdmin, ExamSupporter, InstitutionalAdmin, SebServerAdmin, Teacher,
};
use sebserver_domain::EntityType::{
    Certificate, ClientConnection, ClientEvent, Configuration, ConfigurationNode, Exam,
    ExamConfigurationMap, ExamTemplate, Indicator, Institution, LmsSetup,
    SebClientConfiguration, User, UserActivityLog,
};
use sebserver_domain::PrivilegeLevel;

use crate::{GrantRow, GrantTable};

const NONE: PrivilegeLevel = PrivilegeLevel::None;
const READ: PrivilegeLevel = PrivilegeLevel::ReadOnly;
const MODIFY: PrivilegeLevel = PrivilegeLevel::Modify;
const WRITE: PrivilegeLevel = PrivilegeLevel::Write;

/// `(entity type, role, base, institutional, owner)`
const DEFAULT_GRANTS: &[GrantRow] = &[
    (Institution, SebServerAdmin, WRITE, NONE, NONE),
    (Institution, InstitutionalAdmin, NONE, MODIFY, NONE),
    (Institution, ExamAdmin, NONE, READ, NONE),
    (Institution, ExamSupporter, NONE, READ, NONE),
    (LmsSetup, SebServerAdmin, WRITE, NONE, NONE),
    (LmsSetup, InstitutionalAdmin, NONE, WRITE, NONE),
    (LmsSetup, ExamAdmin, NONE, READ, NONE),
    (SebClientConfiguration, SebServerAdmin, WRITE, NONE, NONE),
    (SebClientConfiguration, InstitutionalAdmin, NONE, WRITE, NONE),
    (SebClientConfiguration, ExamAdmin, NONE, READ, NONE),
    (Exam, SebServerAdmin, READ, NONE, NONE),
    (Exam, InstitutionalAdmin, NONE, READ, NONE),
    (Exam, ExamAdmin, NONE, WRITE, NONE),
    (Exam, ExamSupporter, NONE, NONE, MODIFY),
    (Exam, Teacher, NONE, NONE, MODIFY),
    (ExamTemplate, SebServerAdmin, READ, NONE, NONE),
    (ExamTemplate, InstitutionalAdmin, NONE, WRITE, NONE),
    (ExamTemplate, ExamAdmin, NONE, WRITE, NONE),
    (Indicator, SebServerAdmin, READ, NONE, NONE),
    (Indicator, InstitutionalAdmin, NONE, READ, NONE),
    (Indicator, ExamAdmin, NONE, WRITE, NONE),
    (Indicator, ExamSupporter, NONE, NONE, MODIFY),
    (ExamConfigurationMap, SebServerAdmin, READ, NONE, NONE),
    (ExamConfigurationMap, InstitutionalAdmin, NONE, READ, NONE),
    (ExamConfigurationMap, ExamAdmin, NONE, WRITE, NONE),
    (ExamConfigurationMap, ExamSupporter, NONE, NONE, MODIFY),
    (ConfigurationNode, SebServerAdmin, READ, NONE, NONE),
    (ConfigurationNode, InstitutionalAdmin, NONE, WRITE, NONE),
    (ConfigurationNode, ExamAdmin, NONE, MODIFY, WRITE),
    (ConfigurationNode, ExamSupporter, NONE, READ, MODIFY),
    (Configuration, SebServerAdmin, READ, NONE, NONE),
    (Configuration, InstitutionalAdmin, NONE, WRITE, NONE),
    (Configuration, ExamAdmin, NONE, MODIFY, WRITE),
    (Configuration, ExamSupporter, NONE, READ, MODIFY),
    (ClientConnection, SebServerAdmin, READ, NONE, NONE),
    (ClientConnection, InstitutionalAdmin, NONE, READ, NONE),
    (ClientConnection, ExamAdmin, NONE, MODIFY, NONE),
    (ClientConnection, ExamSupporter, NONE, MODIFY, NONE),
    (ClientConnection, Teacher, NONE, NONE, MODIFY),
    (ClientEvent, SebServerAdmin, READ, NONE, NONE),
    (ClientEvent, InstitutionalAdmin, NONE, READ, NONE),
    (ClientEvent, ExamAdmin, NONE, WRITE, NONE),
    (ClientEvent, ExamSupporter, NONE, WRITE, NONE),
    (ClientEvent, Teacher, NONE, NONE, READ),
    (User, SebServerAdmin, WRITE, NONE, NONE),
    (User, InstitutionalAdmin, NONE, WRITE, NONE),
    (User, ExamAdmin, NONE, NONE, MODIFY),
    (User, ExamSupporter, NONE, NONE, MODIFY),
    (User, Teacher, NONE, NONE, MODIFY),
    (UserActivityLog, SebServerAdmin, READ, NONE, NONE),
    (UserActivityLog, InstitutionalAdmin, NONE, READ, NONE),
    (UserActivityLog, ExamAdmin, NONE, NONE, READ),
    (UserActivityLog, ExamSupporter, NONE, NONE, READ),
    (Certificate, SebServerAdmin, WRITE, NONE, NONE),
    (Certificate, InstitutionalAdmin, NONE, WRITE, NONE),
    (Certificate, ExamAdmin, NONE, READ, NONE),
];

/// Returns the built-in grant table.
#[must_use]
pub fn default_grant_table() -> GrantTable {
    GrantTable::from_rows(DEFAULT_GRANTS)
}
