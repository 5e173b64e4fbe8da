//! Error types for the learning content engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::contract::ContractError;

/// Comprehensive error type for all engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Step index outside the current plan revision
    #[error("Step index {index} is out of range for plan {plan_id} ({len} steps)")]
    StepIndexOutOfRange {
        plan_id: u64,
        index: usize,
        len: usize,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Generator output that could not be turned into a valid contract
    #[error(transparent)]
    Contract(#[from] ContractError),
    /// Write attempted through a read-only session
    #[error("Session is read-only; plan {plan_id} cannot be modified")]
    ReadOnly { plan_id: u64 },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A blocking database task panicked or was cancelled
    #[error("Background task failed: {message}")]
    Task { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> EngineError {
        EngineError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl EngineError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a join failure from a blocking task.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Task {
            message: error.to_string(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|source| EngineError::Database {
            message: message.to_string(),
            source,
        })
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
