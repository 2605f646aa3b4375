use std::fmt::{Display, Formatter};
use std::str::FromStr;

use sebserver_core::AppError;
use serde::{Deserialize, Serialize};

/// Closed set of protected resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// An institution (tenant) of the server.
    Institution,
    /// Connection setup to a learning management system.
    LmsSetup,
    /// Client configuration handed out to SEB clients.
    SebClientConfiguration,
    /// An exam imported from an LMS.
    Exam,
    /// Template used to create exams.
    ExamTemplate,
    /// Monitoring indicator attached to an exam.
    Indicator,
    /// Mapping of an exam configuration to an exam.
    ExamConfigurationMap,
    /// Exam configuration node.
    ConfigurationNode,
    /// Version of an exam configuration.
    Configuration,
    /// Live connection of a SEB client.
    ClientConnection,
    /// Event sent by a SEB client.
    ClientEvent,
    /// A user account.
    User,
    /// Audit log entry of a user action.
    UserActivityLog,
    /// Stored certificate.
    Certificate,
}

impl EntityType {
    /// Returns a stable storage value for this entity type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Institution => "institution",
            Self::LmsSetup => "lms_setup",
            Self::SebClientConfiguration => "seb_client_configuration",
            Self::Exam => "exam",
            Self::ExamTemplate => "exam_template",
            Self::Indicator => "indicator",
            Self::ExamConfigurationMap => "exam_configuration_map",
            Self::ConfigurationNode => "configuration_node",
            Self::Configuration => "configuration",
            Self::ClientConnection => "client_connection",
            Self::ClientEvent => "client_event",
            Self::User => "user",
            Self::UserActivityLog => "user_activity_log",
            Self::Certificate => "certificate",
        }
    }

    /// Returns all known entity types.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[EntityType] = &[
            EntityType::Institution,
            EntityType::LmsSetup,
            EntityType::SebClientConfiguration,
            EntityType::Exam,
            EntityType::ExamTemplate,
            EntityType::Indicator,
            EntityType::ExamConfigurationMap,
            EntityType::ConfigurationNode,
            EntityType::Configuration,
            EntityType::ClientConnection,
            EntityType::ClientEvent,
            EntityType::User,
            EntityType::UserActivityLog,
            EntityType::Certificate,
        ];

        ALL
    }
}

impl Display for EntityType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|entity_type| entity_type.as_str() == trimmed)
            .ok_or_else(|| AppError::Validation(format!("unknown entity type '{value}'")))
    }
}
