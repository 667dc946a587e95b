//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the directory tree's rules.
/// These are independent of how commands arrive or where output goes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("directory {name} already exists")]
    DuplicateName { name: String },

    #[error("{segment} does not exist (segment {position} of {path})")]
    PathNotFound {
        segment: String,
        /// 1-based position of the missing segment
        position: usize,
        path: String,
    },

    #[error("destination {destination} is a subdirectory of {path}")]
    MoveIntoSubtree { path: String, destination: String },
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Expected conditions that are reported and skipped rather than
    /// treated as a failed command.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            DomainError::PathNotFound { .. } | DomainError::MoveIntoSubtree { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
