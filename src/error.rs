use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlHelperError {
    #[cfg(feature = "mysql")]
    #[error(transparent)]
    MysqlError(#[from] mysql_async::Error),

    /// A required value map (or row list) was empty; nothing was submitted.
    #[error("Param Error")]
    ParamError { reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No connection could be checked out to run the statement.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl SqlHelperError {
    pub(crate) fn param(reason: impl Into<String>) -> Self {
        SqlHelperError::ParamError {
            reason: reason.into(),
        }
    }

    /// Error code reported by the server, when the failure came from the server itself.
    #[must_use]
    pub fn server_code(&self) -> Option<u32> {
        match self {
            #[cfg(feature = "mysql")]
            SqlHelperError::MysqlError(mysql_async::Error::Server(server)) => {
                Some(u32::from(server.code))
            }
            _ => None,
        }
    }

    /// Renders this error and every `source()` below it, outermost first.
    #[must_use]
    pub fn trace(&self) -> String {
        let mut lines = vec![format!("{self:?}")];
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            lines.push(format!("caused by: {err}"));
            source = err.source();
        }
        lines.join("\n")
    }
}

#[cfg(feature = "mysql")]
impl From<mysql_async::UrlError> for SqlHelperError {
    fn from(err: mysql_async::UrlError) -> Self {
        SqlHelperError::ConfigError(format!("invalid MySQL URL: {err}"))
    }
}
