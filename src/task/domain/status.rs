//! Task lifecycle status and the transition table that governs it.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Created,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed.
    Completed,
    /// Task has been soft-deleted and can be restored.
    Deleted,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Created,
        Self::InProgress,
        Self::Completed,
        Self::Deleted,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Deleted => "deleted",
        }
    }

    /// Returns whether `transition` may be applied to a task in this status.
    ///
    /// This is the single source of truth for lifecycle preconditions.
    #[must_use]
    pub const fn permits(self, transition: TaskTransition) -> bool {
        match transition {
            TaskTransition::Start => !matches!(self, Self::InProgress),
            TaskTransition::Complete | TaskTransition::Reset => {
                matches!(self, Self::InProgress)
            }
            TaskTransition::Delete | TaskTransition::UpdateDetails => {
                !matches!(self, Self::Deleted)
            }
            TaskTransition::HardDelete => matches!(self, Self::Deleted),
        }
    }

    /// Returns whether the status counts as open work (neither finished nor
    /// discarded).
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Created | Self::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "deleted" => Ok(Self::Deleted),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Lifecycle operations that are guarded by the task status.
///
/// Restore and reopen are not listed: both are aliases of [`Self::Start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskTransition {
    /// Begin work; also restores deleted and reopens completed tasks.
    Start,
    /// Finish work on an in-progress task.
    Complete,
    /// Soft-delete the task.
    Delete,
    /// Return an in-progress task to the created status.
    Reset,
    /// Overwrite title, deadline, and urgency.
    UpdateDetails,
    /// Physically remove a soft-deleted task.
    HardDelete,
}

impl TaskTransition {
    /// Returns the operation name used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Delete => "delete",
            Self::Reset => "reset",
            Self::UpdateDetails => "update details of",
            Self::HardDelete => "permanently delete",
        }
    }

    /// Returns a human-readable description of the precondition.
    #[must_use]
    pub const fn requirement(self) -> &'static str {
        match self {
            Self::Start => "task is already in progress",
            Self::Complete => "only in-progress tasks can be completed",
            Self::Delete => "task is already deleted",
            Self::Reset => "only in-progress tasks can be reset to created",
            Self::UpdateDetails => "deleted tasks cannot be edited",
            Self::HardDelete => "task must be soft-deleted before permanent deletion",
        }
    }

    /// Returns the status a successful transition leads to.
    ///
    /// `None` means the status is left unchanged (detail edits) or the
    /// record ceases to exist (hard delete).
    #[must_use]
    pub const fn target(self) -> Option<TaskStatus> {
        match self {
            Self::Start => Some(TaskStatus::InProgress),
            Self::Complete => Some(TaskStatus::Completed),
            Self::Delete => Some(TaskStatus::Deleted),
            Self::Reset => Some(TaskStatus::Created),
            Self::UpdateDetails | Self::HardDelete => None,
        }
    }
}

impl fmt::Display for TaskTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
