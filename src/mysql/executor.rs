use async_trait::async_trait;
use mysql_async::prelude::{Protocol, Queryable};
use mysql_async::{Conn, Pool, QueryResult, Row};
use tokio::sync::Mutex;

use super::params::Params;
use super::query::build_result_set;
use crate::connection::{QueryResponse, SqlConnection};
use crate::error::SqlHelperError;
use crate::query::QueryAndParams;

/// Run one statement on a checked-out connection
///
/// Statements without parameters go over the text protocol; bound statements are prepared
/// and executed over the binary protocol.
///
/// # Errors
/// Returns errors from statement execution or result collection.
pub async fn run_query(
    conn: &mut Conn,
    query: &QueryAndParams,
) -> Result<QueryResponse, SqlHelperError> {
    if query.is_bound() {
        let params = Params::convert(&query.params)?.into_mysql();
        let result = conn.exec_iter(query.query.as_str(), params).await?;
        collect_response(result).await
    } else {
        let result = conn.query_iter(query.query.as_str()).await?;
        collect_response(result).await
    }
}

async fn collect_response<P: Protocol>(
    mut result: QueryResult<'_, 'static, P>,
) -> Result<QueryResponse, SqlHelperError> {
    // Header and OK-packet data must be read before the rows are drained.
    let column_names: Vec<String> = result
        .columns_ref()
        .iter()
        .map(|col| col.name_str().into_owned())
        .collect();
    let affected_rows = result.affected_rows();
    let last_insert_id = result.last_insert_id();

    let rows: Vec<Row> = result.collect().await?;
    result.drop_result().await?;

    if column_names.is_empty() {
        Ok(QueryResponse::mutation(affected_rows, last_insert_id))
    } else {
        Ok(QueryResponse::rows(build_result_set(column_names, rows)))
    }
}

#[async_trait]
impl SqlConnection for Pool {
    async fn submit(&self, query: &QueryAndParams) -> Result<QueryResponse, SqlHelperError> {
        let mut conn = self
            .get_conn()
            .await
            .map_err(|err| SqlHelperError::ConnectionError(err.to_string()))?;
        run_query(&mut conn, query).await
    }
}

/// One long-lived connection shared by every caller.
///
/// Statements from concurrent callers take turns on the connection in lock order.
#[derive(Debug)]
pub struct MySqlConnection {
    conn: Mutex<Conn>,
}

impl MySqlConnection {
    #[must_use]
    pub fn new(conn: Conn) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Hands the connection back, e.g. so the owner can disconnect it.
    #[must_use]
    pub fn into_inner(self) -> Conn {
        self.conn.into_inner()
    }
}

#[async_trait]
impl SqlConnection for MySqlConnection {
    async fn submit(&self, query: &QueryAndParams) -> Result<QueryResponse, SqlHelperError> {
        let mut conn = self.conn.lock().await;
        run_query(&mut conn, query).await
    }
}
