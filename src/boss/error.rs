//! Error types for boss data loading.

use thiserror::Error;

/// Errors that can occur when loading a boss definition.
#[derive(Debug, Error)]
pub enum BossDataError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A tunable is outside the range the scheduler can run with.
    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}
