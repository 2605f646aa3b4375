use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use sebserver_core::{AppError, UserRole};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct PrivilegesConfig {
    pub grant_table_path: Option<PathBuf>,
    pub role_set: Option<Vec<UserRole>>,
    pub output_format: OutputFormat,
}

impl PrivilegesConfig {
    pub fn load() -> Result<Self, AppError> {
        let grant_table_path = non_empty_env("GRANT_TABLE_PATH").map(PathBuf::from);

        let role_set = non_empty_env("PRIVILEGES_ROLES")
            .map(|value| parse_roles(value.as_str()))
            .transpose()?;

        let output_format = match env::var("PRIVILEGES_FORMAT")
            .unwrap_or_else(|_| "text".to_owned())
            .trim()
        {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            other => {
                return Err(AppError::Validation(format!(
                    "PRIVILEGES_FORMAT must be either 'text' or 'json', got '{other}'"
                )));
            }
        };

        Ok(Self {
            grant_table_path,
            role_set,
            output_format,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn parse_roles(value: &str) -> Result<Vec<UserRole>, AppError> {
    let roles = value
        .split(',')
        .filter(|role| !role.trim().is_empty())
        .map(UserRole::from_str)
        .collect::<Result<Vec<_>, _>>()?;

    if roles.is_empty() {
        return Err(AppError::Validation(
            "PRIVILEGES_ROLES must name at least one role".to_owned(),
        ));
    }

    Ok(roles)
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
