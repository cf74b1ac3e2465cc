//! Error types for notebook-a11y library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for notebook-a11y operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, auditing or remediating notebooks.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error on a reader or writer that has no associated path.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A notebook file could not be read or written.
    #[error("Cannot access '{}': {source}", path.display())]
    File {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The input is not a well-formed notebook.
    #[error("Invalid notebook format: {0}")]
    Format(String),

    /// A single check or fix failed.
    #[error("Rule '{rule}' failed: {message}")]
    RuleEvaluation {
        /// Name of the check or fix
        rule: String,
        /// Failure description
        message: String,
    },

    /// Error during report rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::File`] for the given path.
    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }

    /// Build a [`Error::RuleEvaluation`] for the named rule.
    pub fn rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Error::RuleEvaluation {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Format(err.to_string())
        }
    }
}
