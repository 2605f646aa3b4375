//! Grant evaluation services and ports.

#![forbid(unsafe_code)]

mod authorization_matrix;
mod authorization_service;
mod grant_error;
mod grant_evaluator;
mod grant_ports;
mod grant_registry;
mod grant_rule;
mod grant_table;

pub use authorization_matrix::default_grant_table;
pub use authorization_service::AuthorizationService;
pub use grant_error::GrantError;
pub use grant_evaluator::{GrantEvaluator, GrantFilter};
pub use grant_ports::{CurrentUserProvider, GrantTableSource};
pub use grant_registry::{EffectivePrivilege, GrantRegistry};
pub use grant_rule::{ExamSupporterRule, GrantRule, GrantRules};
pub use grant_table::{GrantRow, GrantTable};
