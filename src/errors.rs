use thiserror::Error;

/// Domain-specific error types for repository persistence
#[derive(Error, Debug)]
pub enum StoreError {
    /// The pool could not supply a connection or could not open a transaction
    #[error("Database connection failed: {message}")]
    ConnectionFailed { message: String },

    /// A statement failed while executing inside the batch transaction
    #[error("Database statement failed during {operation}: {message}")]
    StatementFailed { operation: String, message: String },

    /// The store rejected the commit after the statements succeeded
    #[error("Database commit failed: {message}")]
    CommitFailed { message: String },

    /// A record failed validation before any I/O took place
    #[error("Invalid repository record {node_id}: {reason}")]
    InvalidRecord { node_id: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {parameter} - {message}")]
    ConfigurationError { parameter: String, message: String },

    /// The schema file could not be read or applied
    #[error("Schema bootstrap failed: {message}")]
    SchemaFailed { message: String },

    /// Ingest input could not be read or decoded
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl StoreError {
    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Create a statement error
    pub fn statement(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StatementFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a commit error
    pub fn commit(message: impl Into<String>) -> Self {
        Self::CommitFailed {
            message: message.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a schema bootstrap error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaFailed {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Classifies a driver error raised while acquiring or beginning.
    pub(crate) fn from_acquire(err: &sqlx::Error) -> Self {
        Self::connection(format!("Failed to acquire connection: {err}"))
    }

    /// Whether the failure happened before the store saw the batch.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }
}

/// Result type alias for persistence operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Convert from standard database errors
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed => Self::connection("Connection pool closed"),
            sqlx::Error::PoolTimedOut => Self::connection("Connection pool timed out"),
            sqlx::Error::Io(e) => Self::connection(format!("I/O error: {e}")),
            sqlx::Error::Tls(e) => Self::connection(format!("TLS error: {e}")),
            sqlx::Error::Database(db_err) => {
                Self::statement("query", format!("Database error: {db_err}"))
            }
            err => Self::statement("query", format!("SQLx error: {err}")),
        }
    }
}

/// Convert from serde JSON errors
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON parsing error: {err}"))
    }
}

/// Convert from I/O errors raised while reading input files
impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::invalid_input(format!("I/O error: {err}"))
    }
}
