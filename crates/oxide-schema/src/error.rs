//! Error types for schema generation and execution.

use oxide_schema_core::{ColumnError, Engine, ResolveError};

/// Errors that can occur while creating or dropping a table.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The table name was never set.
    #[error("Undefined table name in: {origin}")]
    UndefinedTable {
        /// Generator or blueprint name.
        origin: String,
    },

    /// The table name is not a snake_case identifier.
    #[error("Invalid table name '{table}' in: {origin}")]
    InvalidTable {
        /// The rejected name.
        table: String,
        /// Generator or blueprint name.
        origin: String,
    },

    /// No executor was configured.
    #[error("Invalid executor in: {origin}")]
    InvalidExecutor {
        /// Generator or blueprint name.
        origin: String,
    },

    /// The executor reports a backend no column family exists for.
    #[error("Invalid driver '{backend}' in: {origin}")]
    InvalidEngine {
        /// Backend name reported by the executor.
        backend: String,
        /// Generator or blueprint name.
        origin: String,
    },

    /// `schema` was called without any columns.
    #[error("Undefined schema columns in: {origin}")]
    EmptySchema {
        /// Generator or blueprint name.
        origin: String,
    },

    /// Some columns belong to another engine family.
    #[error("Invalid columns in: {origin} ({mismatched} column(s) are not {expected} columns)")]
    InvalidColumns {
        /// Generator or blueprint name.
        origin: String,
        /// The engine of the active executor.
        expected: Engine,
        /// Number of columns of another family.
        mismatched: usize,
    },

    /// A column rejected one of its builder calls.
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// The columns could not be resolved into statements.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The executor failed; the error is passed through unchanged.
    #[error(transparent)]
    Execution(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// IO error (reading definition files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed schema definition.
    #[error("Invalid schema definition: {0}")]
    Definition(#[from] serde_json::Error),
}

impl SchemaError {
    /// Wraps an executor error.
    pub fn execution<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution(Box::new(error))
    }

    /// Returns the executor error, if this is one.
    #[must_use]
    pub fn as_execution(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Execution(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
