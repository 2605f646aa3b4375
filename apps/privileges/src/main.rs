//! Prints the effective privilege matrix of the SEB Server grant model.

#![forbid(unsafe_code)]

mod privileges_config;

use std::sync::Arc;

use sebserver_application::{
    AuthorizationService, EffectivePrivilege, ExamSupporterRule, GrantEvaluator, GrantRegistry,
    GrantRules, GrantTableSource,
};
use sebserver_core::{AppError, AppResult, InstitutionId, UserId, UserIdentity, UserRole};
use sebserver_domain::EntityType;
use sebserver_infrastructure::{
    BuiltinGrantTableSource, JsonGrantTableSource, StaticCurrentUserProvider,
};
use serde::Serialize;
use tracing::info;

use crate::privileges_config::{OutputFormat, PrivilegesConfig, init_tracing};

#[derive(Debug, Serialize)]
struct PrivilegeReport {
    roles: Vec<UserRole>,
    privileges: Vec<EffectivePrivilege>,
}

fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = PrivilegesConfig::load()?;
    let evaluator = build_evaluator(&config)?;

    info!(
        grants = evaluator.registry().len(),
        custom_table = config.grant_table_path.is_some(),
        "grant registry ready"
    );

    let role_sets = match &config.role_set {
        Some(roles) => vec![roles.clone()],
        None => UserRole::all().iter().map(|role| vec![*role]).collect(),
    };

    let reports = role_sets
        .into_iter()
        .map(|roles| build_report(&evaluator, roles))
        .collect::<AppResult<Vec<_>>>()?;

    match config.output_format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&reports).map_err(|error| {
                AppError::Internal(format!("failed to render privileges: {error}"))
            })?;
            println!("{rendered}");
        }
        OutputFormat::Text => {
            for report in &reports {
                print!("{}", render_text(report));
            }
        }
    }

    Ok(())
}

fn build_evaluator(config: &PrivilegesConfig) -> AppResult<GrantEvaluator> {
    let table = match &config.grant_table_path {
        Some(path) => JsonGrantTableSource::new(path.clone()).load()?,
        None => BuiltinGrantTableSource.load()?,
    };
    let registry = GrantRegistry::from_table(table);
    let rules = GrantRules::new().with_rule(
        EntityType::Exam,
        ExamSupporterRule::for_entity_type(&registry, EntityType::Exam),
    )?;

    Ok(GrantEvaluator::new(registry, rules))
}

fn build_report(evaluator: &GrantEvaluator, roles: Vec<UserRole>) -> AppResult<PrivilegeReport> {
    let identity = UserIdentity::new(
        UserId::new(),
        "privileges-report",
        InstitutionId::new(0),
        roles.iter().copied(),
    );
    let service = AuthorizationService::new(
        evaluator.clone(),
        Arc::new(StaticCurrentUserProvider::signed_in(identity)),
    );

    Ok(PrivilegeReport {
        roles,
        privileges: service.privileges_for_current_user()?,
    })
}

fn render_text(report: &PrivilegeReport) -> String {
    let roles: Vec<&str> = report.roles.iter().map(UserRole::as_str).collect();
    let mut rendered = format!("[{}]\n", roles.join(", "));

    if report.privileges.is_empty() {
        rendered.push_str("  (no privileges)\n");
    }
    for privilege in &report.privileges {
        rendered.push_str(
            format!(
                "  {:<26} base={:<9} institutional={:<9} owner={}\n",
                privilege.entity_type.as_str(),
                privilege.base.as_str(),
                privilege.institutional.as_str(),
                privilege.owner.as_str(),
            )
            .as_str(),
        );
    }

    rendered
}
