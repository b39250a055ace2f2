use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue, json};

use crate::connection::QueryResponse;
use crate::error::SqlHelperError;
use crate::results::ResultSet;

/// Message carried by failures raised before anything reaches the connection.
pub const PARAM_ERROR: &str = "Param Error";

/// Diagnostic fields of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Human-readable error text
    pub message: String,
    /// Location reported by the driver; for server-side errors this is the server error code.
    pub location: Option<u32>,
    /// Rendered error chain
    pub trace: Option<String>,
}

impl Failure {
    /// The local validation failure: no location, no trace.
    #[must_use]
    pub fn param_error() -> Self {
        Self {
            message: PARAM_ERROR.to_string(),
            location: None,
            trace: None,
        }
    }

    #[must_use]
    pub fn from_error(err: &SqlHelperError) -> Self {
        if matches!(err, SqlHelperError::ParamError { .. }) {
            return Self::param_error();
        }
        Self {
            message: err.to_string(),
            location: err.server_code(),
            trace: Some(err.trace()),
        }
    }

    #[must_use]
    pub fn is_param_error(&self) -> bool {
        self.message == PARAM_ERROR && self.location.is_none() && self.trace.is_none()
    }
}

/// The single value every helper operation resolves to.
#[derive(Debug, Clone)]
pub enum ExecutionOutcome {
    /// The statement produced a result set (possibly empty).
    Rows { count: usize, rows: ResultSet },
    /// The statement changed rows. `insert_id` is only present when the driver reported a
    /// nonzero id.
    Mutation {
        affected_rows: u64,
        insert_id: Option<u64>,
    },
    Failure(Failure),
}

impl ExecutionOutcome {
    /// Folds a driver response into rows or a mutation summary.
    #[must_use]
    pub fn from_response(response: QueryResponse) -> Self {
        match response.rows {
            Some(rows) => ExecutionOutcome::Rows {
                count: rows.len(),
                rows,
            },
            None => ExecutionOutcome::Mutation {
                affected_rows: response.affected_rows,
                insert_id: response.last_insert_id.filter(|id| *id != 0),
            },
        }
    }

    #[must_use]
    pub fn from_error(err: &SqlHelperError) -> Self {
        ExecutionOutcome::Failure(Failure::from_error(err))
    }

    #[must_use]
    pub fn param_error() -> Self {
        ExecutionOutcome::Failure(Failure::param_error())
    }

    /// The `result` flag of the serialized outcome.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, ExecutionOutcome::Failure(_))
    }

    #[must_use]
    pub fn rows(&self) -> Option<&ResultSet> {
        match self {
            ExecutionOutcome::Rows { rows, .. } => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_rows(self) -> Option<ResultSet> {
        match self {
            ExecutionOutcome::Rows { rows, .. } => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match self {
            ExecutionOutcome::Rows { count, .. } => Some(*count),
            _ => None,
        }
    }

    #[must_use]
    pub fn affected_rows(&self) -> Option<u64> {
        match self {
            ExecutionOutcome::Mutation { affected_rows, .. } => Some(*affected_rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn insert_id(&self) -> Option<u64> {
        match self {
            ExecutionOutcome::Mutation { insert_id, .. } => *insert_id,
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ExecutionOutcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// Loosely typed form handed to callers that inspect a `result` flag:
    ///
    /// - `{"result": true, "count": N, "rows": [...]}`
    /// - `{"result": true, "affectedRows": N, "insertId": I}` (`insertId` only when nonzero)
    /// - `{"result": false, "error": "...", "line": L, "details": "..."}` (`line` and
    ///   `details` only when known)
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            ExecutionOutcome::Rows { count, rows } => json!({
                "result": true,
                "count": count,
                "rows": rows.to_json(),
            }),
            ExecutionOutcome::Mutation {
                affected_rows,
                insert_id,
            } => {
                let mut object = Map::new();
                object.insert("result".into(), JsonValue::Bool(true));
                object.insert("affectedRows".into(), JsonValue::from(*affected_rows));
                if let Some(id) = insert_id {
                    object.insert("insertId".into(), JsonValue::from(*id));
                }
                JsonValue::Object(object)
            }
            ExecutionOutcome::Failure(failure) => {
                let mut object = Map::new();
                object.insert("result".into(), JsonValue::Bool(false));
                object.insert("error".into(), JsonValue::String(failure.message.clone()));
                if let Some(line) = failure.location {
                    object.insert("line".into(), JsonValue::from(line));
                }
                if let Some(trace) = &failure.trace {
                    object.insert("details".into(), JsonValue::String(trace.clone()));
                }
                JsonValue::Object(object)
            }
        }
    }
}

impl Serialize for ExecutionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
