//! Error types for port operations.

/// Persistence operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Filesystem operation failed - includes operation name for tracing.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PersistenceError {
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}
