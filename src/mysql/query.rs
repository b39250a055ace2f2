use std::sync::Arc;

use mysql_async::Row;

use super::params::from_mysql_value;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Build a result set from rows collected off one MySQL result set
///
/// `column_names` come from the result set header, so an empty `rows` still yields a
/// result set with columns.
#[must_use]
pub fn build_result_set(column_names: Vec<String>, rows: Vec<Row>) -> ResultSet {
    let col_count = column_names.len();
    let mut result_set = ResultSet::with_capacity(rows.len());
    result_set.set_column_names(Arc::new(column_names));

    for row in rows {
        let row_values: Vec<RowValues> = (0..col_count)
            .map(|idx| row.as_ref(idx).map_or(RowValues::Null, from_mysql_value))
            .collect();
        result_set.add_row_values(row_values);
    }

    result_set
}
