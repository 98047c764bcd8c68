//! Label text interpretation.

mod interpreter;
pub mod rules;
pub mod validator;

pub use interpreter::{InterpretResult, LabelInterpreter};
pub use validator::ItemValidator;

use crate::error::InterpretError;

/// Result type for interpretation operations.
pub type Result<T> = std::result::Result<T, InterpretError>;

/// Trait for label parsing.
pub trait LabelParser {
    /// Parse recognized label text, surfacing boundary failures.
    fn parse(&self, text: &str) -> Result<InterpretResult>;
}
