//! Service-level errors shared by the lifecycle and query services.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation or a lifecycle precondition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// No task exists with the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Coarse classification of [`TaskServiceError`] for boundary layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// The addressed task does not exist.
    NotFound,
    /// A lifecycle precondition was violated.
    InvalidTransition,
    /// Input failed validation before any write.
    Validation,
    /// Storage or another collaborator failed; opaque to the core.
    Infrastructure,
}

impl TaskServiceError {
    /// Classifies the error for mapping onto caller-facing responses.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                TaskErrorKind::NotFound
            }
            Self::Domain(TaskDomainError::InvalidTransition { .. }) => {
                TaskErrorKind::InvalidTransition
            }
            Self::Domain(
                TaskDomainError::EmptyTitle | TaskDomainError::InconsistentLifecycle { .. },
            ) => TaskErrorKind::Validation,
            Self::Repository(_) => TaskErrorKind::Infrastructure,
        }
    }
}
