use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Result type for jast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the jast crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Parse error in {}: {source}", .path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Attach the offending file to a parse error
    pub fn in_file(path: impl Into<PathBuf>, source: ParseError) -> Self {
        Self::ParseFile { path: path.into(), source }
    }

    /// The underlying parse error, if this is one
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) | Error::ParseFile { source: err, .. } => Some(err),
            _ => None,
        }
    }
}
