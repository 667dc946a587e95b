//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add command-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid command {0:?}, must be one of CREATE, LIST, MOVE, DELETE")]
    InvalidCommand(String),

    #[error("{command} expects {expected} argument(s) ({usage}), got {got}")]
    InvalidArity {
        command: &'static str,
        expected: usize,
        usage: &'static str,
        got: usize,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// True for conditions reported as a warning instead of an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, ApplicationError::Domain(e) if e.is_warning())
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
