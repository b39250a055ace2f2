use std::sync::Arc;

use tracing::{debug, warn};

use crate::connection::SqlConnection;
use crate::error::SqlHelperError;
use crate::outcome::ExecutionOutcome;
use crate::query::{QueryAndParams, QueryOptions};
use crate::statement::StatementFactory;
use crate::types::{SqlValue, ValueMap};

/// Builds statements and runs them on a shared connection.
///
/// Every operation resolves to an [`ExecutionOutcome`]: parameter problems, driver errors and
/// successes all come back through the same value, nothing is returned as `Err`.
///
/// The connection is borrowed for each call and never opened, closed or reconfigured here.
/// Concurrent calls are ordered by the connection implementation alone.
pub struct DatabaseHelper<C: SqlConnection + ?Sized> {
    connection: Arc<C>,
    statements: StatementFactory,
}

impl<C: SqlConnection + ?Sized> Clone for DatabaseHelper<C> {
    fn clone(&self) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
            statements: self.statements,
        }
    }
}

impl<C: SqlConnection + ?Sized> DatabaseHelper<C> {
    /// Helper with default options: escaping on, values interpolated inline.
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            connection,
            statements: StatementFactory::default(),
        }
    }

    /// Same connection, different statement options.
    #[must_use]
    pub fn with_options(&self, options: QueryOptions) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
            statements: StatementFactory::new(options),
        }
    }

    #[must_use]
    pub fn options(&self) -> QueryOptions {
        self.statements.options()
    }

    /// The statement builders this helper uses, for callers that want the text only.
    #[must_use]
    pub fn statements(&self) -> &StatementFactory {
        &self.statements
    }

    #[must_use]
    pub fn connection(&self) -> &Arc<C> {
        &self.connection
    }

    pub async fn select(&self, table: &str, filter: &ValueMap, columns: &[&str]) -> ExecutionOutcome {
        self.run(self.statements.select(table, filter, columns)).await
    }

    /// `select` with a verbatim join fragment before `WHERE` and a verbatim trailing
    /// fragment after it.
    pub async fn select_with(
        &self,
        table: &str,
        filter: &ValueMap,
        columns: &[&str],
        extra: Option<&str>,
        join: Option<&str>,
    ) -> ExecutionOutcome {
        self.run(self.statements.select_with(table, filter, columns, extra, join))
            .await
    }

    pub async fn insert(&self, table: &str, values: &ValueMap) -> ExecutionOutcome {
        self.run(self.statements.insert(table, values)).await
    }

    pub async fn multi_insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> ExecutionOutcome {
        self.run(self.statements.multi_insert(table, columns, rows))
            .await
    }

    pub async fn insert_update(
        &self,
        table: &str,
        insert: &ValueMap,
        update: &ValueMap,
    ) -> ExecutionOutcome {
        self.run(self.statements.insert_update(table, insert, update))
            .await
    }

    pub async fn multi_insert_update(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
        alias: &str,
        update: &ValueMap,
    ) -> ExecutionOutcome {
        self.run(
            self.statements
                .multi_insert_update(table, columns, rows, alias, update),
        )
        .await
    }

    pub async fn update(&self, table: &str, set: &ValueMap, filter: &ValueMap) -> ExecutionOutcome {
        self.run(self.statements.update(table, set, filter)).await
    }

    /// Runs caller-written SQL as is.
    pub async fn query(&self, sql: &str) -> ExecutionOutcome {
        self.execute(&QueryAndParams::new_without_params(sql)).await
    }

    /// Submits a built statement and normalizes whatever the connection reports.
    pub async fn execute(&self, query: &QueryAndParams) -> ExecutionOutcome {
        debug!(sql = %query.query, params = query.params.len(), "submitting statement");
        match self.connection.submit(query).await {
            Ok(response) => {
                let outcome = ExecutionOutcome::from_response(response);
                debug!(
                    count = ?outcome.count(),
                    affected_rows = ?outcome.affected_rows(),
                    insert_id = ?outcome.insert_id(),
                    "statement completed"
                );
                outcome
            }
            Err(err) => {
                warn!(sql = %query.query, error = %err, "statement failed");
                ExecutionOutcome::from_error(&err)
            }
        }
    }

    async fn run(&self, built: Result<QueryAndParams, SqlHelperError>) -> ExecutionOutcome {
        match built {
            Ok(query) => self.execute(&query).await,
            Err(err) => {
                match &err {
                    SqlHelperError::ParamError { reason } => {
                        warn!(%reason, "statement rejected before submission");
                    }
                    other => warn!(error = %other, "statement could not be built"),
                }
                ExecutionOutcome::from_error(&err)
            }
        }
    }
}
