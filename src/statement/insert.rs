use super::{StatementFactory, require_entries};
use crate::clause::ClauseBuilder;
use crate::error::SqlHelperError;
use crate::query::QueryAndParams;
use crate::types::{SqlValue, ValueMap};

impl StatementFactory {
    /// `INSERT INTO <table> (<keys>) VALUES (<vals>);`
    ///
    /// Values are quoted like everywhere else; text that is already a SQL literal should be
    /// passed as [`SqlValue::Raw`].
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParameterError` if a value is a list.
    pub fn insert(&self, table: &str, values: &ValueMap) -> Result<QueryAndParams, SqlHelperError> {
        let mut clauses = self.clauses();
        let columns = clauses.columns(values.keys());
        let tuple = clauses.tuple(values.values())?;
        let query = format!("INSERT INTO {table} ({columns}) VALUES ({tuple});");
        Ok(clauses.finish(query))
    }

    /// `INSERT INTO <table> (<cols>) VALUES (<row1>),(<row2>),...`
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParamError` when `rows` is empty and
    /// `SqlHelperError::ParameterError` if a value is a list.
    pub fn multi_insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> Result<QueryAndParams, SqlHelperError> {
        require_rows(rows)?;
        let mut clauses = self.clauses();
        let query = format!(
            "INSERT INTO {table} ({}) VALUES {}",
            clauses.columns(columns.iter().copied()),
            value_rows(&mut clauses, rows)?
        );
        Ok(clauses.finish(query))
    }

    /// `INSERT ... VALUES (...) ON DUPLICATE KEY UPDATE <assignments>`
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParamError` when either map is empty.
    pub fn insert_update(
        &self,
        table: &str,
        insert: &ValueMap,
        update: &ValueMap,
    ) -> Result<QueryAndParams, SqlHelperError> {
        require_entries(insert, "insert values")?;
        require_entries(update, "update values")?;

        let mut clauses = self.clauses();
        let columns = clauses.columns(insert.keys());
        let tuple = clauses.tuple(insert.values())?;
        let assignments = clauses.assignments(update)?;
        let query = format!(
            "INSERT INTO {table} ({columns}) VALUES ({tuple}) ON DUPLICATE KEY UPDATE {assignments}"
        );
        Ok(clauses.finish(query))
    }

    /// Batch upsert using the row-alias form, so `update` may refer to the proposed row
    /// through `alias` (for example `SqlValue::raw("IF(new.qty > qty, new.qty, qty)")`).
    ///
    /// `INSERT INTO <table> (<cols>) VALUES (...),(...) AS <alias> ON DUPLICATE KEY UPDATE ...`
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParamError` when `rows` or `update` is empty.
    pub fn multi_insert_update(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
        alias: &str,
        update: &ValueMap,
    ) -> Result<QueryAndParams, SqlHelperError> {
        require_entries(update, "update values")?;
        require_rows(rows)?;

        let mut clauses = self.clauses();
        let columns = clauses.columns(columns.iter().copied());
        let values = value_rows(&mut clauses, rows)?;
        let alias = clauses.identifier(alias).into_owned();
        let assignments = clauses.assignments(update)?;
        let query = format!(
            "INSERT INTO {table} ({columns}) VALUES {values} AS {alias} ON DUPLICATE KEY UPDATE {assignments}"
        );
        Ok(clauses.finish(query))
    }
}

fn require_rows(rows: &[Vec<SqlValue>]) -> Result<(), SqlHelperError> {
    if rows.is_empty() {
        return Err(SqlHelperError::param("rows must not be empty"));
    }
    Ok(())
}

fn value_rows(clauses: &mut ClauseBuilder, rows: &[Vec<SqlValue>]) -> Result<String, SqlHelperError> {
    let mut rendered = Vec::with_capacity(rows.len());
    for row in rows {
        rendered.push(format!("({})", clauses.tuple(row)?));
    }
    Ok(rendered.join(","))
}

#[cfg(test)]
mod tests {
    use crate::error::SqlHelperError;
    use crate::query::{Binding, QueryOptions};
    use crate::types::{RowValues, SqlValue, ValueMap};
    use crate::StatementFactory;

    #[test]
    fn insert_quotes_text_and_keeps_numbers_bare() {
        let values = ValueMap::new().with("id", 1).with("name", "O'Neil");
        let built = StatementFactory::default().insert("people", &values).unwrap();
        assert_eq!(
            built.query,
            "INSERT INTO people (id, name) VALUES (1,'O\\'Neil');"
        );
    }

    #[test]
    fn insert_accepts_prequoted_raw_values() {
        let values = ValueMap::new()
            .with("id", SqlValue::raw("42"))
            .with("created", SqlValue::raw("NOW()"));
        let built = StatementFactory::default().insert("t", &values).unwrap();
        assert_eq!(built.query, "INSERT INTO t (id, created) VALUES (42,NOW());");
    }

    #[test]
    fn multi_insert_renders_every_row() {
        let rows = vec![
            vec![SqlValue::Int(1), SqlValue::from("a")],
            vec![SqlValue::Int(2), SqlValue::Null],
        ];
        let built = StatementFactory::default()
            .multi_insert("t", &["id", "label"], &rows)
            .unwrap();
        assert_eq!(
            built.query,
            "INSERT INTO t (id, label) VALUES (1,'a'),(2,NULL)"
        );
    }

    #[test]
    fn multi_insert_without_rows_is_a_param_error() {
        let err = StatementFactory::default()
            .multi_insert("t", &["id"], &[])
            .unwrap_err();
        assert!(matches!(err, SqlHelperError::ParamError { .. }));
    }

    #[test]
    fn insert_update_matches_documented_shape() {
        let insert = ValueMap::new().with("id", 1).with("name", "x");
        let update = ValueMap::new().with("name", "y");
        let built = StatementFactory::default()
            .insert_update("table", &insert, &update)
            .unwrap();
        assert_eq!(
            built.query,
            "INSERT INTO table (id, name) VALUES (1,'x') ON DUPLICATE KEY UPDATE name = 'y'"
        );
    }

    #[test]
    fn insert_update_requires_both_maps() {
        let filled = ValueMap::new().with("id", 1);
        let statements = StatementFactory::default();
        assert!(matches!(
            statements.insert_update("t", &ValueMap::new(), &filled),
            Err(SqlHelperError::ParamError { .. })
        ));
        assert!(matches!(
            statements.insert_update("t", &filled, &ValueMap::new()),
            Err(SqlHelperError::ParamError { .. })
        ));
    }

    #[test]
    fn multi_insert_update_uses_row_alias() {
        let rows = vec![
            vec![SqlValue::Int(1), SqlValue::Int(5), SqlValue::Null],
            vec![SqlValue::Int(2), SqlValue::Int(3), SqlValue::from("n")],
        ];
        let update = ValueMap::new()
            .with("qty", SqlValue::raw("IF(new.qty > qty, new.qty, qty)"))
            .with("note", SqlValue::Null)
            .with("source", "sync");
        let built = StatementFactory::default()
            .multi_insert_update("stock", &["id", "qty", "note"], &rows, "new", &update)
            .unwrap();
        assert_eq!(
            built.query,
            "INSERT INTO stock (id, qty, note) VALUES (1,5,NULL),(2,3,'n') AS new \
             ON DUPLICATE KEY UPDATE qty = IF(new.qty > qty, new.qty, qty),note = NULL,source = 'sync'"
        );
    }

    #[test]
    fn multi_insert_update_requires_rows_and_updates() {
        let statements = StatementFactory::default();
        let update = ValueMap::new().with("qty", 1);
        assert!(matches!(
            statements.multi_insert_update("t", &["id"], &[], "new", &update),
            Err(SqlHelperError::ParamError { .. })
        ));
        assert!(matches!(
            statements.multi_insert_update("t", &["id"], &[vec![SqlValue::Int(1)]], "new", &ValueMap::new()),
            Err(SqlHelperError::ParamError { .. })
        ));
    }

    #[test]
    fn bound_upsert_orders_params_values_then_assignments() {
        let statements =
            StatementFactory::new(QueryOptions::default().with_binding(Binding::Bound));
        let insert = ValueMap::new().with("id", 9).with("name", "a");
        let update = ValueMap::new().with("name", "b");
        let built = statements.insert_update("t", &insert, &update).unwrap();
        assert_eq!(
            built.query,
            "INSERT INTO t (id, name) VALUES (?,?) ON DUPLICATE KEY UPDATE name = ?"
        );
        assert_eq!(
            built.params,
            vec![
                RowValues::Int(9),
                RowValues::Text("a".into()),
                RowValues::Text("b".into()),
            ]
        );
    }
}
