//! Error types for geodata format operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing geodata files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid format structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Required column is missing from a table
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name (or accepted names) of the missing column
        column: String,
    },

    /// A value in a table row could not be parsed
    #[error("Line {line}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        /// 1-based line number in the source file
        line: usize,
        /// Column the value belongs to
        column: String,
        /// The raw value
        value: String,
    },

    /// No registered format handles this file
    #[error("Unsupported file type: {path:?}")]
    UnsupportedFile {
        /// Path of the file
        path: PathBuf,
    },

    /// Operation not supported by this format
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl FormatError {
    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(line: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            line,
            column: column.into(),
            value: value.into(),
        }
    }
}
