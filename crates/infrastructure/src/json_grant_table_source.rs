//! Grant table loaded from a JSON file.

use std::fs;
use std::path::PathBuf;

use sebserver_application::{GrantTable, GrantTableSource};
use sebserver_core::{AppError, AppResult};
use sebserver_domain::RoleGrant;
use tracing::info;

/// Reads a JSON array of grant rows.
///
/// Each row is `{"entity_type", "role", "base", "institutional", "owner"}`
/// with snake_case storage values; omitted tiers default to `none` and
/// unknown keys are rejected.
#[derive(Debug, Clone)]
pub struct JsonGrantTableSource {
    path: PathBuf,
}

impl JsonGrantTableSource {
    /// Creates a source for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GrantTableSource for JsonGrantTableSource {
    fn load(&self) -> AppResult<GrantTable> {
        let content = fs::read_to_string(&self.path).map_err(|error| {
            AppError::NotFound(format!(
                "failed to read grant table '{}': {error}",
                self.path.display()
            ))
        })?;
        let table = parse_grant_table(content.as_str())?;

        info!(
            path = %self.path.display(),
            rows = table.len(),
            "grant table loaded"
        );

        Ok(table)
    }
}

/// Parses the JSON grant table format.
pub fn parse_grant_table(content: &str) -> AppResult<GrantTable> {
    let rows: Vec<RoleGrant> = serde_json::from_str(content)
        .map_err(|error| AppError::Validation(format!("invalid grant table: {error}")))?;

    Ok(GrantTable::from_grants(rows))
}
