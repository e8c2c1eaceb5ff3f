// Domain errors - Error types for the domain layer

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed timestamp, range, crop, filter or fps argument
    #[error("Invalid format: {0}")]
    Format(String),

    /// A cut line was found before any input path in a text instruction file
    #[error("Did not find a path before {line:?}")]
    MissingInput { line: String },

    /// Referenced input path does not exist
    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The external tool exited unsuccessfully
    #[error("{program} failed ({status}): {command}")]
    InvocationFailure {
        program: String,
        command: String,
        status: String,
    },

    /// The external tool could not be located
    #[error("`{program}` not found in PATH")]
    ToolNotFound { program: String },

    /// Nothing to do for the given arguments
    #[error("Bad arguments: {0}")]
    Usage(String),

    /// Invalid configuration file or environment value
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DomainError {
    pub fn format(message: impl Into<String>) -> Self {
        DomainError::Format(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DomainError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Non-fatal problems found while re-reading a concat manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestWarning {
    /// Line that is neither a provenance comment nor a usable `file` line
    MalformedLine { line_number: usize, line: String },
    /// `file` entry whose artifact no longer exists
    StaleReference { line_number: usize, path: PathBuf },
}

impl std::fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestWarning::MalformedLine { line_number, line } => {
                write!(f, "found junk in clips file at line {}: {:?}", line_number, line)
            }
            ManifestWarning::StaleReference { line_number, path } => {
                write!(f, "{} does not exist (line {})", path.display(), line_number)
            }
        }
    }
}
