use async_trait::async_trait;

use crate::error::SqlHelperError;
use crate::query::QueryAndParams;
use crate::results::ResultSet;

/// What the driver hands back for one successful statement.
#[derive(Debug, Clone, Default)]
pub struct QueryResponse {
    /// Present whenever the statement produced a result set, even an empty one.
    pub rows: Option<ResultSet>,
    pub affected_rows: u64,
    pub last_insert_id: Option<u64>,
}

impl QueryResponse {
    #[must_use]
    pub fn rows(rows: ResultSet) -> Self {
        Self {
            rows: Some(rows),
            affected_rows: 0,
            last_insert_id: None,
        }
    }

    #[must_use]
    pub fn mutation(affected_rows: u64, last_insert_id: Option<u64>) -> Self {
        Self {
            rows: None,
            affected_rows,
            last_insert_id,
        }
    }
}

/// An already established connection that can run one statement at a time per call.
///
/// Implementations own transport, pooling and reconnection. Callers of this trait only
/// submit statements; they never open or close anything.
#[async_trait]
pub trait SqlConnection: Send + Sync {
    /// Runs `query` and reports either its rows or its mutation summary.
    ///
    /// # Errors
    /// Returns the driver's error when the statement cannot be executed.
    async fn submit(&self, query: &QueryAndParams) -> Result<QueryResponse, SqlHelperError>;
}

