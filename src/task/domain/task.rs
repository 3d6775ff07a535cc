//! Task aggregate root and its lifecycle transitions.

use super::{
    TaskDeadline, TaskDomainError, TaskId, TaskStatus, TaskTitle, TaskTransition, TaskUrgency,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Editable task details supplied at creation or by a detail update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// Validated title.
    pub title: TaskTitle,
    /// Deadline date and optional time.
    pub deadline: TaskDeadline,
    /// Caller-assigned urgency.
    pub urgency: TaskUrgency,
}

impl TaskDetails {
    /// Bundles validated task details.
    #[must_use]
    pub const fn new(title: TaskTitle, deadline: TaskDeadline, urgency: TaskUrgency) -> Self {
        Self {
            title,
            deadline,
            urgency,
        }
    }
}

/// Task aggregate root.
///
/// Deserialization is validated through [`Task::from_persisted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    deadline: TaskDeadline,
    urgency: TaskUrgency,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted deadline.
    pub deadline: TaskDeadline,
    /// Persisted urgency.
    pub urgency: TaskUrgency,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp, if any.
    pub updated_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

impl Task {
    /// Creates a new task in the [`TaskStatus::Created`] state.
    #[must_use]
    pub fn new(details: TaskDetails, clock: &impl Clock) -> Self {
        let TaskDetails {
            title,
            deadline,
            urgency,
        } = details;

        Self {
            id: TaskId::new(),
            title,
            deadline,
            urgency,
            status: TaskStatus::Created,
            created_at: clock.utc(),
            updated_at: None,
            completed_at: None,
            deleted_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InconsistentLifecycle`] when a lifecycle
    /// timestamp disagrees with the status, or when `updated_at` precedes
    /// `created_at`.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        let inconsistent = |reason| TaskDomainError::InconsistentLifecycle {
            task_id: data.id,
            reason,
        };
        if data.completed_at.is_some() != (data.status == TaskStatus::Completed) {
            return Err(inconsistent("completed_at must be set exactly while completed"));
        }
        if data.deleted_at.is_some() != (data.status == TaskStatus::Deleted) {
            return Err(inconsistent("deleted_at must be set exactly while deleted"));
        }
        if data.updated_at.is_some_and(|updated_at| updated_at < data.created_at) {
            return Err(inconsistent("updated_at must not precede created_at"));
        }

        Ok(Self {
            id: data.id,
            title: data.title,
            deadline: data.deadline,
            urgency: data.urgency,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
            deleted_at: data.deleted_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task deadline.
    #[must_use]
    pub const fn deadline(&self) -> TaskDeadline {
        self.deadline
    }

    /// Returns the task urgency.
    #[must_use]
    pub const fn urgency(&self) -> TaskUrgency {
        self.urgency
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp, if the task was ever mutated.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the completion timestamp while the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the soft-deletion timestamp while the task is deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Starts work on the task.
    ///
    /// Starting a deleted task restores it and starting a completed task
    /// reopens it; both clear the matching timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] if the task is already
    /// in progress.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.apply(TaskTransition::Start, clock)
    }

    /// Restores a soft-deleted task. Alias of [`Self::start`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] if the task is already
    /// in progress.
    pub fn restore(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.start(clock)
    }

    /// Reopens a completed task. Alias of [`Self::start`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] if the task is already
    /// in progress.
    pub fn reopen(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.start(clock)
    }

    /// Completes an in-progress task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is in
    /// progress.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.apply(TaskTransition::Complete, clock)
    }

    /// Soft-deletes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] if the task is already
    /// deleted.
    pub fn delete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.apply(TaskTransition::Delete, clock)
    }

    /// Returns an in-progress task to the created status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is in
    /// progress.
    pub fn reset(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.apply(TaskTransition::Reset, clock)
    }

    /// Overwrites the editable details of the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] if the task is deleted.
    pub fn update_details(
        &mut self,
        details: TaskDetails,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.guard(TaskTransition::UpdateDetails)?;
        let TaskDetails {
            title,
            deadline,
            urgency,
        } = details;
        self.title = title;
        self.deadline = deadline;
        self.urgency = urgency;
        self.touch(clock.utc());
        Ok(())
    }

    /// Checks that the task may be physically removed from storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// soft-deleted.
    pub fn ensure_hard_deletable(&self) -> Result<(), TaskDomainError> {
        self.guard(TaskTransition::HardDelete)
    }

    fn guard(&self, transition: TaskTransition) -> Result<(), TaskDomainError> {
        if self.status.permits(transition) {
            return Ok(());
        }
        Err(TaskDomainError::InvalidTransition {
            task_id: self.id,
            from: self.status,
            transition,
        })
    }

    /// Applies a status-changing transition after its guard passes.
    fn apply(
        &mut self,
        transition: TaskTransition,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.guard(transition)?;
        let Some(target) = transition.target() else {
            return Ok(());
        };

        let now = clock.utc();
        self.status = target;
        self.completed_at = match target {
            TaskStatus::Completed => Some(now),
            _ => None,
        };
        if target == TaskStatus::Deleted {
            self.deleted_at = Some(now);
        } else if target == TaskStatus::InProgress {
            self.deleted_at = None;
        }
        self.touch(now);
        Ok(())
    }

    /// Records a mutation, never stamping earlier than the creation time.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now.max(self.created_at));
    }
}
