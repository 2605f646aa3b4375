use sebserver_application::{GrantTable, GrantTableSource, default_grant_table};
use sebserver_core::AppResult;

/// Serves the built-in authorization matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGrantTableSource;

impl GrantTableSource for BuiltinGrantTableSource {
    fn load(&self) -> AppResult<GrantTable> {
        Ok(default_grant_table())
    }
}
