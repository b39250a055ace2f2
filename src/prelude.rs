//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::clause::ClauseBuilder;
pub use crate::connection::{QueryResponse, SqlConnection};
pub use crate::error::SqlHelperError;
pub use crate::escape::{escape, escape_map, escape_opt};
pub use crate::executor::DatabaseHelper;
pub use crate::outcome::{ExecutionOutcome, Failure, PARAM_ERROR};
pub use crate::query::{Binding, QueryAndParams, QueryOptions};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::statement::StatementFactory;
pub use crate::types::{RowValues, SqlValue, ValueMap};

#[cfg(feature = "mysql")]
pub use crate::mysql::{MySqlConnection, MySqlOptions, MySqlOptionsBuilder};
