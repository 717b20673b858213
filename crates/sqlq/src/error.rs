//! Error types for sqlq

use thiserror::Error;

/// Result type alias for sqlq operations
pub type QResult<T> = Result<T, QError>;

/// Error types for statement rendering and execution
#[derive(Debug, Error)]
pub enum QError {
    /// INSERT/UPDATE rendered without any assignment
    #[error("need at least one assignment expression to generate {statement} statements")]
    MissingAssignment { statement: &'static str },

    /// INSERT/DELETE rendered without a target table
    #[error("must set table to generate {statement} statements")]
    MissingTable { statement: &'static str },

    /// Unrecognized dialect name
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    /// The process-wide default dialect can only be set once
    #[error("default dialect is already set")]
    DefaultDialectAlreadySet,

    /// The SQL log truncation length can only be set once
    #[error("SQL log length is already set")]
    LogSqlMaxLenAlreadySet,

    /// Rebinding a prepared argument whose key never appeared in the statement
    #[error("unknown prepared argument key: {0}")]
    UnknownArgKey(String),

    /// Invalid configuration input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query execution error
    #[cfg(feature = "postgres")]
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl QError {
    /// Create a missing-assignment error for the given statement kind
    pub fn missing_assignment(statement: &'static str) -> Self {
        Self::MissingAssignment { statement }
    }

    /// Create a missing-table error for the given statement kind
    pub fn missing_table(statement: &'static str) -> Self {
        Self::MissingTable { statement }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error signals a misuse of a statement builder
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::MissingAssignment { .. } | Self::MissingTable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn programming_errors_are_classified() {
        assert!(QError::missing_assignment("INSERT").is_programming_error());
        assert!(QError::missing_table("DELETE").is_programming_error());
        assert!(!QError::UnknownArgKey("id".into()).is_programming_error());
    }

    #[test]
    fn messages_name_the_statement() {
        let err = QError::missing_assignment("UPDATE");
        assert_eq!(
            err.to_string(),
            "need at least one assignment expression to generate UPDATE statements"
        );
        let err = QError::missing_table("DELETE");
        assert_eq!(err.to_string(), "must set table to generate DELETE statements");
    }
}
