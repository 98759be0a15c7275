//! Error types for the extension helpers
//!
//! Only the strict helpers return these errors. Best-effort helpers such as
//! [`to_int`](crate::utils::strings::to_int) or
//! [`is_email`](crate::utils::email::is_email) fall back to a safe default
//! instead and never produce an [`Error`].

use thiserror::Error;

/// Main error type for the extension helpers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Argument errors

    /// A required argument was absent
    #[error("Value cannot be null. (Parameter '{0}')")]
    NullArgument(String),

    /// Composite format template is malformed or references a missing argument
    #[error("Format error: {0}")]
    Format(String),

    /// Regular expression failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Culture name could not be resolved to formatting conventions
    #[error("Culture is not supported: {0}")]
    UnknownCulture(String),

    /// Date components are out of the representable range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    // External collaborator errors

    /// A page of a paged query failed to execute
    #[error("Query failed at offset {offset}: {message}")]
    Query {
        /// Offset the failing page was requested at
        offset: usize,
        /// Failure reported by the query source
        message: String,
    },

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

/// Type alias for Results using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a null-argument error naming the absent parameter
    pub fn null_argument<S: Into<String>>(param: S) -> Self {
        Self::NullArgument(param.into())
    }

    /// Create a format error with a message
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Self::Format(msg.into())
    }

    /// Create a query error for the page requested at `offset`
    pub fn query<S: Into<String>>(offset: usize, message: S) -> Self {
        Self::Query {
            offset,
            message: message.into(),
        }
    }

    /// Check if this error was caused by an invalid argument
    pub const fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::NullArgument(_)
                | Self::Format(_)
                | Self::InvalidPattern(_)
                | Self::UnknownCulture(_)
                | Self::InvalidDate(_)
        )
    }

    /// Check if this error came from a paged query source
    pub const fn is_query_error(&self) -> bool {
        matches!(self, Self::Query { .. })
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Self::InvalidPattern(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::null_argument("value");
        assert_eq!(err.to_string(), "Value cannot be null. (Parameter 'value')");

        let err = Error::query(30, "connection reset");
        assert_eq!(err.to_string(), "Query failed at offset 30: connection reset");

        let err = Error::custom("Custom error message");
        assert_eq!(err.to_string(), "Custom error message");
    }

    #[test]
    fn test_error_categories() {
        assert!(Error::null_argument("value").is_argument_error());
        assert!(Error::format("Index out of range").is_argument_error());
        assert!(Error::UnknownCulture("xx-XX".to_string()).is_argument_error());
        assert!(!Error::query(0, "boom").is_argument_error());

        assert!(Error::query(0, "boom").is_query_error());
        assert!(!Error::custom("other").is_query_error());
    }

    #[test]
    fn test_from_regex_error() {
        let err: Error = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
