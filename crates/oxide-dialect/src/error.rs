//! Error types for dialect rendering.

/// Boxed error returned by the executor and introspector collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while rendering dialect SQL.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// A value could not be coerced to the type its column demands.
    #[error("cannot coerce {value:?} to {target}")]
    ValueCoercion {
        /// The offending value as text.
        value: String,
        /// The type the column demanded.
        target: &'static str,
    },

    /// The pagination rewriter could not find a SELECT/FROM boundary.
    #[error("unrecognized statement shape: {0}")]
    UnrecognizedStatementShape(String),

    /// The statement executor failed.
    #[error("executor error: {0}")]
    Executor(#[source] BoxError),

    /// The schema introspector failed.
    #[error("introspection error: {0}")]
    Introspection(#[source] BoxError),

    /// Invalid dialect configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration could not be deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
