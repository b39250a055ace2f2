//! Helper utilities for testing and development.

use crate::results::{CustomDbRow, ResultSet};
use crate::types::RowValues;
use std::sync::Arc;

/// Create a test row with the given column names and values.
#[must_use]
pub fn create_test_row(column_names: Vec<String>, values: Vec<RowValues>) -> CustomDbRow {
    CustomDbRow::new(Arc::new(column_names), values)
}

/// Create a result set whose rows all share `column_names`.
#[must_use]
pub fn create_test_result_set(column_names: &[&str], rows: Vec<Vec<RowValues>>) -> ResultSet {
    let mut result_set = ResultSet::with_capacity(rows.len());
    result_set.set_column_names(Arc::new(
        column_names.iter().map(|name| (*name).to_string()).collect(),
    ));
    for row in rows {
        result_set.add_row_values(row);
    }
    result_set
}
