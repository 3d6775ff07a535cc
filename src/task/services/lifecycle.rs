//! Service layer for task creation, detail edits, and lifecycle transitions.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{Task, TaskDeadline, TaskDetails, TaskDomainError, TaskId, TaskTitle, TaskUrgency},
    ports::TaskRepository,
};
use chrono::{NaiveDate, NaiveTime};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Request payload carrying the editable fields of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailsRequest {
    title: String,
    deadline_date: NaiveDate,
    deadline_time: Option<NaiveTime>,
    urgency: TaskUrgency,
}

/// Request payload for creating a task.
pub type CreateTaskRequest = TaskDetailsRequest;

/// Request payload for overwriting the details of a task.
pub type UpdateTaskDetailsRequest = TaskDetailsRequest;

impl TaskDetailsRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, deadline_date: NaiveDate, urgency: TaskUrgency) -> Self {
        Self {
            title: title.into(),
            deadline_date,
            deadline_time: None,
            urgency,
        }
    }

    /// Sets the deadline time of day.
    #[must_use]
    pub const fn with_deadline_time(mut self, time: NaiveTime) -> Self {
        self.deadline_time = Some(time);
        self
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        let Self {
            title,
            deadline_date,
            deadline_time,
            urgency,
        } = self;
        Ok(TaskDetails::new(
            TaskTitle::new(title)?,
            TaskDeadline::new(deadline_date, deadline_time),
            urgency,
        ))
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores a new task in the created status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is blank (nothing
    /// is written) or [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let task = Task::new(request.into_details()?, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), urgency = %task.urgency(), "task created");
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// Returns `Ok(None)` when no task has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Loads a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the identifier.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Overwrites title, deadline, and urgency.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for unknown tasks and
    /// [`TaskServiceError::Domain`] for blank titles or deleted tasks.
    pub async fn update_details(
        &self,
        id: TaskId,
        request: UpdateTaskDetailsRequest,
    ) -> TaskServiceResult<Task> {
        let details = request.into_details()?;
        self.mutate(id, "details updated", move |task, clock| {
            task.update_details(details, clock)
        })
        .await
    }

    /// Starts work on a task; restores deleted and reopens completed tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for unknown tasks and
    /// [`TaskServiceError::Domain`] if the task is already in progress.
    pub async fn start(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.mutate(id, "started", |task, clock| task.start(clock)).await
    }

    /// Reopens a completed task. Alias of [`Self::start`].
    ///
    /// # Errors
    ///
    /// See [`Self::start`].
    pub async fn reopen(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.start(id).await
    }

    /// Restores a soft-deleted task. Alias of [`Self::start`].
    ///
    /// # Errors
    ///
    /// See [`Self::start`].
    pub async fn restore(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.start(id).await
    }

    /// Completes an in-progress task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for unknown tasks and
    /// [`TaskServiceError::Domain`] unless the task is in progress.
    pub async fn complete(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.mutate(id, "completed", |task, clock| task.complete(clock)).await
    }

    /// Soft-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for unknown tasks and
    /// [`TaskServiceError::Domain`] if the task is already deleted.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.mutate(id, "deleted", |task, clock| task.delete(clock)).await
    }

    /// Returns an in-progress task to the created status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for unknown tasks and
    /// [`TaskServiceError::Domain`] unless the task is in progress.
    pub async fn reset(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.mutate(id, "reset", |task, clock| task.reset(clock)).await
    }

    /// Physically removes a soft-deleted task from storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for unknown tasks and
    /// [`TaskServiceError::Domain`] unless the task is soft-deleted.
    pub async fn hard_delete(&self, id: TaskId) -> TaskServiceResult<()> {
        let task = self.get_task(id).await?;
        task.ensure_hard_deletable()?;
        self.repository.delete(id).await?;
        info!(task_id = %id, "task permanently deleted");
        Ok(())
    }

    /// Loads a task, applies a domain operation, and persists the result.
    ///
    /// Nothing is written when the operation is rejected.
    async fn mutate<F>(
        &self,
        id: TaskId,
        outcome: &'static str,
        operation: F,
    ) -> TaskServiceResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError> + Send,
    {
        let mut task = self.get_task(id).await?;
        operation(&mut task, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %id, status = %task.status(), "task {outcome}");
        Ok(task)
    }
}
