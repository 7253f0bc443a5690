//! Error types for the listing library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all listing operations.
#[derive(Error, Debug)]
pub enum ListingError {
    /// A playbook given on the command line does not exist
    #[error("the playbook: {path} could not be found")]
    PlaybookNotFound { path: PathBuf },
    /// A playbook path exists but is neither a regular file nor a pipe
    #[error("the playbook: {path} does not appear to be a file")]
    NotAFile { path: PathBuf },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A playbook or inventory document could not be parsed
    #[error("Parse error in '{path}': {message}")]
    Parse { path: PathBuf, message: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for creating parse errors bound to a source file.
pub struct ParseErrorBuilder {
    path: PathBuf,
}

impl ParseErrorBuilder {
    /// Create a new parse error builder for a file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build the error with the given message.
    pub fn with_message(self, message: impl Into<String>) -> ListingError {
        ListingError::Parse {
            path: self.path,
            message: message.into(),
        }
    }
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
    pub fn with_reason(self, reason: impl Into<String>) -> ListingError {
        ListingError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ListingError {
    /// Creates a builder for parse errors.
    pub fn parse(path: impl Into<PathBuf>) -> ParseErrorBuilder {
        ParseErrorBuilder::new(path)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// Extension trait mapping YAML errors onto [`ListingError::Parse`].
pub trait YamlResultExt<T> {
    /// Attach the offending file to a YAML error.
    fn parse_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> YamlResultExt<T> for std::result::Result<T, serde_yaml::Error> {
    fn parse_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| ListingError::parse(path).with_message(e.to_string()))
    }
}

/// Result type alias for listing operations
pub type Result<T> = std::result::Result<T, ListingError>;
