//! Errors produced by the configuration engine.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A source file set could not be loaded or built into instances.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Syntax {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{path}: top level must be a mapping")]
    NotAMapping { path: PathBuf },

    #[error("{path}: {field}: {message}")]
    Invalid {
        path: PathBuf,
        field: String,
        message: String,
    },
}

/// An error located at a path inside a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    /// Dotted path of the offending value (empty for the root).
    pub path: String,
    pub message: String,
}

impl ValueError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValueError {}

/// Every error found by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub errors: Vec<ValueError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}
