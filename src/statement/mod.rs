use crate::clause::ClauseBuilder;
use crate::error::SqlHelperError;
use crate::query::QueryOptions;
use crate::types::ValueMap;

mod insert;
mod select;
mod update;

/// Assembles complete statements from table names and value maps.
///
/// Table names, alias names and caller-supplied clause fragments (joins, `ORDER BY`, ...) are
/// interpolated as given. Column names and data values follow [`QueryOptions`].
///
/// ```rust
/// use mysql_helper::prelude::*;
///
/// let statements = StatementFactory::default();
/// let built = statements
///     .select("users", &ValueMap::new().with("status", "A"), &["id", "name"])
///     .unwrap();
/// assert_eq!(built.query, "SELECT id,name FROM users WHERE status = 'A'");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementFactory {
    options: QueryOptions,
}

impl StatementFactory {
    #[must_use]
    pub fn new(options: QueryOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> QueryOptions {
        self.options
    }

    fn clauses(&self) -> ClauseBuilder {
        ClauseBuilder::new(self.options)
    }
}

fn require_entries(map: &ValueMap, what: &str) -> Result<(), SqlHelperError> {
    if map.is_empty() {
        return Err(SqlHelperError::param(format!("{what} must not be empty")));
    }
    Ok(())
}
