//! Error types for task domain validation, transitions, and parsing.

use super::{TaskId, TaskStatus, TaskTransition};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The requested transition is not permitted from the current status.
    #[error(
        "cannot {} task {task_id} while it is {from}: {}",
        .transition.as_str(),
        .transition.requirement()
    )]
    InvalidTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the task was in when the transition was attempted.
        from: TaskStatus,
        /// Transition that was attempted.
        transition: TaskTransition,
    },

    /// Persisted fields contradict the lifecycle rules.
    #[error("task {task_id} has inconsistent lifecycle data: {reason}")]
    InconsistentLifecycle {
        /// Task whose stored data was rejected.
        task_id: TaskId,
        /// Rule that the data violates.
        reason: &'static str,
    },
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task urgency levels from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task urgency: {0}")]
pub struct ParseTaskUrgencyError(pub String);
