//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unknown shape: {0}")]
    UnknownShape(String),

    #[error("invalid content: {message}")]
    Content { message: String },

    #[error("quiz session already finished")]
    QuizFinished,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    pub fn content(message: impl Into<String>) -> Self {
        Self::Content {
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
