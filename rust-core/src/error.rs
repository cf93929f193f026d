use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while importing simulation output or deriving fields from it.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row of a data file could not be interpreted. On the canonical path this
    /// is also the signal to retry with the legacy reader.
    #[error("{}:{}: {}", .path.display(), .line, .message)]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("invalid contraction: {0}")]
    Contraction(String),

    #[error("invalid stride {0}, must be at least 1")]
    InvalidStride(usize),

    #[error("invalid plane: {0}")]
    InvalidPlane(String),

    #[error("invalid file pattern {0}")]
    Pattern(String),

    #[error("no input files to import")]
    EmptyInput,

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl ViewError {
    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        ViewError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ViewError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that mean "this file is not in the expected schema".
    pub fn is_parse(&self) -> bool {
        matches!(self, ViewError::Parse { .. })
    }
}

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, ViewError>;
