use chrono::{Datelike, NaiveDateTime, Timelike};
use serde_json::Value as JsonValue;

use crate::error::SqlHelperError;

/// Values read back from a row, or bound as statement parameters.
///
/// ```rust
/// use mysql_helper::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Unsigned integer too large for `Int`
    UInt(u64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// JSON rendering used by [`ExecutionOutcome::to_json`](crate::ExecutionOutcome::to_json).
    ///
    /// Timestamps become `YYYY-MM-DD HH:MM:SS[.ffffff]` strings; blobs that are not valid
    /// UTF-8 become arrays of bytes.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            RowValues::Int(i) => JsonValue::from(*i),
            RowValues::UInt(u) => JsonValue::from(*u),
            RowValues::Float(f) => JsonValue::from(*f),
            RowValues::Text(s) => JsonValue::String(s.clone()),
            RowValues::Bool(b) => JsonValue::Bool(*b),
            RowValues::Timestamp(ts) => {
                JsonValue::String(ts.format(TIMESTAMP_FORMAT).to_string())
            }
            RowValues::Null => JsonValue::Null,
            RowValues::Blob(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => JsonValue::String(text.to_string()),
                Err(_) => JsonValue::from(bytes.clone()),
            },
        }
    }
}

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Rejects timestamps MySQL cannot store: years outside `0..=9999` and leap seconds.
pub(crate) fn check_timestamp(ts: &NaiveDateTime) -> Result<(), SqlHelperError> {
    if !(0..=9999).contains(&ts.year()) {
        return Err(SqlHelperError::ParameterError(format!(
            "timestamp {ts} is outside the MySQL DATETIME year range"
        )));
    }
    if ts.nanosecond() >= 1_000_000_000 {
        return Err(SqlHelperError::ParameterError(format!(
            "leap-second timestamp {ts} has no MySQL form"
        )));
    }
    Ok(())
}

/// A value destined for a generated statement.
///
/// Data values are escaped (and quoted when textual) before interpolation. [`SqlValue::Raw`]
/// is the one exception: it carries a SQL expression such as `IF(new.qty > qty, new.qty, qty)`
/// and is emitted verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Timestamp(NaiveDateTime),
    /// Rendered as `IN (...)` in a predicate; rejected in SET and VALUES positions.
    List(Vec<SqlValue>),
    /// Verbatim SQL expression. Never escaped, never quoted.
    Raw(String),
}

impl SqlValue {
    /// Wraps a SQL expression that must reach the statement untouched.
    pub fn raw(expr: impl Into<String>) -> Self {
        SqlValue::Raw(expr.into())
    }

    /// Classifies untyped text the way older callers expect: anything shaped like
    /// `IF(...)` is an expression, everything else is data.
    pub fn infer(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with("IF(") && text.ends_with(')') {
            SqlValue::Raw(text)
        } else {
            SqlValue::Text(text)
        }
    }

    /// Builds a list value from anything convertible element-wise.
    pub fn list<T: Into<SqlValue>>(items: impl IntoIterator<Item = T>) -> Self {
        SqlValue::List(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, SqlValue::Raw(_))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<u32> for SqlValue {
    fn from(value: u32) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<i16> for SqlValue {
    fn from(value: i16) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<u16> for SqlValue {
    fn from(value: u16) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

/// Values that fit in `i64` stay `Int`; only the top half of the range needs `UInt`.
impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(SqlValue::UInt(value), SqlValue::Int)
    }
}

impl From<usize> for SqlValue {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| SqlValue::Text(value.to_string()), SqlValue::from)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for SqlValue {
    fn from(values: Vec<T>) -> Self {
        SqlValue::list(values)
    }
}

/// Column → value mapping that keeps insertion order, which is also clause order.
///
/// Re-inserting an existing column replaces its value in place.
///
/// ```rust
/// use mysql_helper::prelude::*;
///
/// let filter = ValueMap::new()
///     .with("status", "A")
///     .with("id", vec![1, 2, 3]);
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    entries: Vec<(String, SqlValue)>,
}

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (column, value) in iter {
            map.insert(column, value);
        }
        map
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
