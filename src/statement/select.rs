use super::StatementFactory;
use crate::error::SqlHelperError;
use crate::query::QueryAndParams;
use crate::types::ValueMap;

impl StatementFactory {
    /// `SELECT <cols> FROM <table> WHERE <predicate>`.
    ///
    /// An empty `columns` slice selects `*`; an empty filter matches every row.
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParameterError` if the filter holds a value with no SQL form.
    pub fn select(
        &self,
        table: &str,
        filter: &ValueMap,
        columns: &[&str],
    ) -> Result<QueryAndParams, SqlHelperError> {
        self.select_with(table, filter, columns, None, None)
    }

    /// [`select`](Self::select) with a join fragment placed before `WHERE` and a trailing
    /// fragment (`ORDER BY`, `LIMIT`, ...) placed after it. Both are inserted verbatim.
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParameterError` if the filter holds a value with no SQL form.
    pub fn select_with(
        &self,
        table: &str,
        filter: &ValueMap,
        columns: &[&str],
        extra: Option<&str>,
        join: Option<&str>,
    ) -> Result<QueryAndParams, SqlHelperError> {
        let mut clauses = self.clauses();

        let selection = if columns.is_empty() {
            "*".to_string()
        } else {
            columns
                .iter()
                .map(|column| clauses.identifier(column).into_owned())
                .collect::<Vec<_>>()
                .join(",")
        };

        let mut query = format!("SELECT {selection} FROM {table}");
        if let Some(join) = join {
            query.push(' ');
            query.push_str(join);
        }
        query.push_str(" WHERE ");
        query.push_str(&clauses.predicate(filter)?);
        if let Some(extra) = extra {
            query.push(' ');
            query.push_str(extra);
        }

        Ok(clauses.finish(query))
    }
}
