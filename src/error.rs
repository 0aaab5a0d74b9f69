//! Error types for meshlint.
//!
//! Analysis itself never fails: unreadable files and malformed resources
//! are collected as parse errors. These errors surface from loading input
//! and configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshlintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML syntax error in {} at line {line}: {message}", .path.display())]
    Yaml {
        path: PathBuf,
        line: u32,
        message: String,
    },

    /// A document of a known kind whose body does not match its schema.
    #[error("Invalid {kind} in {} at line {line}: {message}", .path.display())]
    InvalidResource {
        kind: String,
        path: PathBuf,
        line: u32,
        message: String,
    },

    #[error("{0} input path(s) could not be loaded")]
    InputFailed(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid suppression rule '{0}': expected CODE=RESOURCE")]
    InvalidSuppression(String),
}

/// Result type alias for meshlint operations
pub type Result<T> = std::result::Result<T, MeshlintError>;
