//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
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
            CliError::Infra(e) => match e {
                InfraError::Input { .. } => exitcode::NOINPUT,
                InfraError::LogFile { .. } => exitcode::CANTCREAT,
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Application(ApplicationError::Config { .. }) => exitcode::CONFIG,
                InfraError::Application(_) => exitcode::SOFTWARE,
            },
        }
    }
}

/// Exit code for a failed argument parse: `--help` and `--version` are not
/// failures.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        exitcode::USAGE
    } else {
        exitcode::OK
    }
}
