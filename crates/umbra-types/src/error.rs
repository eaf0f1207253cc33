//! Error types for umbra.
//!
//! All crates return `UmbraResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for umbra.
#[derive(Debug, Error)]
pub enum UmbraError {
    /// The mesh source could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The mesh description is malformed: bad count line, wrong field
    /// count, non-numeric token or a truncated section.
    #[error("Format error at line {line}: {message}")]
    Format {
        /// 1-based line number in the source.
        line: usize,
        message: String,
    },

    /// Mesh data parsed but is structurally inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl UmbraError {
    /// Shorthand for building a [`UmbraError::Format`].
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias for `Result<T, UmbraError>`.
pub type UmbraResult<T> = Result<T, UmbraError>;
