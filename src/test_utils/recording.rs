use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::connection::{QueryResponse, SqlConnection};
use crate::error::SqlHelperError;
use crate::query::QueryAndParams;
use crate::results::ResultSet;

/// A `SqlConnection` that replays queued responses and records every statement it sees.
///
/// When the queue runs dry each statement reports zero affected rows.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    responses: Mutex<VecDeque<Result<QueryResponse, SqlHelperError>>>,
    submitted: Mutex<Vec<QueryAndParams>>,
}

impl RecordingConnection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rows(&self, rows: ResultSet) {
        self.push(Ok(QueryResponse::rows(rows)));
    }

    pub fn push_mutation(&self, affected_rows: u64, last_insert_id: Option<u64>) {
        self.push(Ok(QueryResponse::mutation(affected_rows, last_insert_id)));
    }

    pub fn push_error(&self, err: SqlHelperError) {
        self.push(Err(err));
    }

    /// Every statement submitted so far, oldest first.
    #[must_use]
    pub fn submitted(&self) -> Vec<QueryAndParams> {
        self.submitted
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Statement text of every submission, oldest first.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.submitted().into_iter().map(|q| q.query).collect()
    }

    fn push(&self, response: Result<QueryResponse, SqlHelperError>) {
        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(response);
    }
}

#[async_trait]
impl SqlConnection for RecordingConnection {
    async fn submit(&self, query: &QueryAndParams) -> Result<QueryResponse, SqlHelperError> {
        self.submitted
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(query.clone());
        let next = self
            .responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();
        next.unwrap_or_else(|| Ok(QueryResponse::mutation(0, None)))
    }
}
