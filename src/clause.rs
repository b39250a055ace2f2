//! Predicate, assignment and value-tuple fragments.
//!
//! A [`ClauseBuilder`] renders fragments left to right and collects bound parameters in the
//! same order, so fragments must be requested in the order they appear in the final
//! statement.

use std::borrow::Cow;

use crate::error::SqlHelperError;
use crate::escape::escape;
use crate::query::{Binding, QueryAndParams, QueryOptions};
use crate::types::{RowValues, SqlValue, TIMESTAMP_FORMAT, ValueMap, check_timestamp};

/// Renders value maps into SQL fragments under one set of [`QueryOptions`].
#[derive(Debug)]
pub struct ClauseBuilder {
    options: QueryOptions,
    params: Vec<RowValues>,
}

impl ClauseBuilder {
    #[must_use]
    pub fn new(options: QueryOptions) -> Self {
        Self {
            options,
            params: Vec::new(),
        }
    }

    /// Column or alias name, escaped when escaping is on.
    #[must_use]
    pub fn identifier<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.options.escape {
            escape(name)
        } else {
            Cow::Borrowed(name)
        }
    }

    /// `WHERE` body: `a = 'x' AND b IN ('1','2')`.
    ///
    /// An empty map renders `1`, which matches every row. Callers that must not match
    /// everything reject empty maps before getting here.
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParameterError` for nested lists, non-finite floats or
    /// timestamps MySQL cannot store.
    pub fn predicate(&mut self, map: &ValueMap) -> Result<String, SqlHelperError> {
        if map.is_empty() {
            return Ok("1".to_string());
        }

        let mut clauses = Vec::with_capacity(map.len());
        for (column, value) in map.iter() {
            let column = self.identifier(column).into_owned();
            let clause = match value {
                SqlValue::List(items) => format!("{column} IN ({})", self.in_list(items)?),
                SqlValue::Null => format!("{column} IS NULL"),
                scalar => format!("{column} = {}", self.literal(scalar)?),
            };
            clauses.push(clause);
        }
        Ok(clauses.join(" AND "))
    }

    /// `SET` / `ON DUPLICATE KEY UPDATE` body: `a = 'x',b = NULL,c = IF(...)`.
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParameterError` when a value is a list.
    pub fn assignments(&mut self, map: &ValueMap) -> Result<String, SqlHelperError> {
        let mut parts = Vec::with_capacity(map.len());
        for (column, value) in map.iter() {
            let column = self.identifier(column).into_owned();
            if matches!(value, SqlValue::List(_)) {
                return Err(SqlHelperError::ParameterError(format!(
                    "list value for `{column}` is only valid in a predicate"
                )));
            }
            parts.push(format!("{column} = {}", self.literal(value)?));
        }
        Ok(parts.join(","))
    }

    /// Comma-joined column names for an `INSERT` column list.
    #[must_use]
    pub fn columns<'a, I>(&self, names: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(|name| self.identifier(name).into_owned())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Comma-joined literals for one `VALUES (...)` tuple, without the parentheses.
    ///
    /// # Errors
    /// Returns `SqlHelperError::ParameterError` when a value is a list.
    pub fn tuple<'v, I>(&mut self, values: I) -> Result<String, SqlHelperError>
    where
        I: IntoIterator<Item = &'v SqlValue>,
    {
        let mut rendered = Vec::new();
        for value in values {
            if matches!(value, SqlValue::List(_)) {
                return Err(SqlHelperError::ParameterError(
                    "list values cannot be inserted".to_string(),
                ));
            }
            rendered.push(self.literal(value)?);
        }
        Ok(rendered.join(","))
    }

    /// Wraps finished statement text together with the parameters collected so far.
    #[must_use]
    pub fn finish(self, query: String) -> QueryAndParams {
        QueryAndParams::new(query, self.params)
    }

    fn in_list(&mut self, items: &[SqlValue]) -> Result<String, SqlHelperError> {
        if items.is_empty() {
            return Ok("NULL".to_string());
        }
        let mut rendered = Vec::with_capacity(items.len());
        for item in items {
            if matches!(item, SqlValue::List(_)) {
                return Err(SqlHelperError::ParameterError(
                    "nested lists are not supported".to_string(),
                ));
            }
            rendered.push(self.literal(item)?);
        }
        Ok(rendered.join(","))
    }

    fn literal(&mut self, value: &SqlValue) -> Result<String, SqlHelperError> {
        let bound = self.options.binding == Binding::Bound;
        let rendered = match value {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Raw(expr) => expr.clone(),
            SqlValue::Int(i) if bound => self.bind(RowValues::Int(*i)),
            SqlValue::Int(i) => i.to_string(),
            SqlValue::UInt(u) if bound => self.bind(RowValues::UInt(*u)),
            SqlValue::UInt(u) => u.to_string(),
            SqlValue::Float(f) if !f.is_finite() => {
                return Err(SqlHelperError::ParameterError(format!(
                    "non-finite float {f} has no SQL literal"
                )));
            }
            SqlValue::Float(f) if bound => self.bind(RowValues::Float(*f)),
            SqlValue::Float(f) => f.to_string(),
            SqlValue::Bool(b) if bound => self.bind(RowValues::Bool(*b)),
            SqlValue::Bool(b) => String::from(if *b { "1" } else { "0" }),
            SqlValue::Text(text) if bound => self.bind(RowValues::Text(text.clone())),
            SqlValue::Text(text) => self.quoted(text),
            SqlValue::Timestamp(ts) => {
                check_timestamp(ts)?;
                if bound {
                    self.bind(RowValues::Timestamp(*ts))
                } else {
                    format!("'{}'", ts.format(TIMESTAMP_FORMAT))
                }
            }
            SqlValue::List(_) => {
                return Err(SqlHelperError::ParameterError(
                    "list value in scalar position".to_string(),
                ));
            }
        };
        Ok(rendered)
    }

    fn quoted(&self, text: &str) -> String {
        if self.options.escape {
            format!("'{}'", escape(text))
        } else {
            format!("'{text}'")
        }
    }

    fn bind(&mut self, value: RowValues) -> String {
        self.params.push(value);
        "?".to_string()
    }
}
