//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::ScoreFile { .. } | InfraError::Terminal { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::UnknownShape(_)
                    | ApplicationError::Domain(DomainError::UnknownNode(_)) => {
                        crate::exitcode::NOINPUT
                    }
                    ApplicationError::Domain(DomainError::UnknownInput { .. }) => {
                        crate::exitcode::USAGE
                    }
                    ApplicationError::Domain(DomainError::InvalidGraph(_))
                    | ApplicationError::Content { .. } => crate::exitcode::DATAERR,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                    ApplicationError::QuizFinished => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}
