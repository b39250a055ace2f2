use super::{StatementFactory, require_entries};
use crate::error::SqlHelperError;
use crate::query::QueryAndParams;
use crate::types::ValueMap;

impl StatementFactory {
    /// `UPDATE <table> SET <assignments> WHERE <predicate>`
    ///
    /// Both maps are required; an empty filter never turns into a table-wide update.
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParamError` when either map is empty.
    pub fn update(
        &self,
        table: &str,
        set: &ValueMap,
        filter: &ValueMap,
    ) -> Result<QueryAndParams, SqlHelperError> {
        require_entries(set, "update values")?;
        require_entries(filter, "where values")?;

        let mut clauses = self.clauses();
        let assignments = clauses.assignments(set)?;
        let predicate = clauses.predicate(filter)?;
        Ok(clauses.finish(format!(
            "UPDATE {table} SET {assignments} WHERE {predicate}"
        )))
    }
}
