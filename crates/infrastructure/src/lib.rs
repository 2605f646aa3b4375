//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod builtin_grant_table_source;
mod json_grant_table_source;
mod static_current_user_provider;

pub use builtin_grant_table_source::BuiltinGrantTableSource;
pub use json_grant_table_source::{JsonGrantTableSource, parse_grant_table};
pub use static_current_user_provider::StaticCurrentUserProvider;
