//! Infrastructure-level errors (wraps application errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("high score file {}: {source}", path.display())]
    ScoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("terminal I/O failed: {context}")]
    Terminal {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn score_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ScoreFile {
            path: path.into(),
            source,
        }
    }

    /// Reading answers or writing help text failed.
    pub fn terminal(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Terminal {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
