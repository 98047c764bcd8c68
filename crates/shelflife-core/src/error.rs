//! Error types for the shelflife-core library.

use thiserror::Error;

/// Main error type for the shelflife library.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Label interpretation error.
    #[error("interpretation error: {0}")]
    Interpret(#[from] InterpretError),

    /// Item validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised at the interpreter boundary.
///
/// None of these reach callers of [`crate::LabelInterpreter::interpret`];
/// they are logged and turned into an empty item list there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// The input exceeds the configured size limit.
    #[error("input of {len} bytes exceeds limit of {max} bytes")]
    InputTooLarge { len: usize, max: usize },

    /// The input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    /// A pipeline stage failed unexpectedly.
    #[error("internal pipeline failure: {0}")]
    Internal(String),
}

/// Errors related to item validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The name is missing or blank after trimming.
    #[error("item name is empty")]
    EmptyName,
}

/// Result type for the shelflife library.
pub type Result<T> = std::result::Result<T, ShelfError>;
