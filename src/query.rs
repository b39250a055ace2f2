use crate::types::RowValues;

/// A statement and its parameters bundled together
///
/// Statements built with [`Binding::Inline`] carry no parameters; the values are already
/// part of `query`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL statement text
    pub query: String,
    /// Positional parameters for the `?` placeholders in `query`
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.params.is_empty()
    }
}

/// How data values reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    /// Escape, quote and interpolate values into the statement text.
    #[default]
    Inline,
    /// Emit `?` placeholders and send values as prepared-statement parameters.
    ///
    /// `NULL` and raw expressions stay inline.
    Bound,
}

/// Per-helper options for statement assembly.
///
/// # Examples
/// ```rust
/// use mysql_helper::prelude::*;
///
/// let options = QueryOptions::default()
///     .with_escape(false)
///     .with_binding(Binding::Bound);
/// assert!(!options.escape);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Escape column names and textual values before interpolation. When off, the caller
    /// vouches for every input.
    pub escape: bool,
    pub binding: Binding,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            escape: true,
            binding: Binding::default(),
        }
    }
}

impl QueryOptions {
    #[must_use]
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    #[must_use]
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }
}
