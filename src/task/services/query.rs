//! Read-side service: filtered listings, overdue and upcoming views, stats.

use super::{
    TaskQueryConfig, TaskServiceResult,
    filters::{TaskListFilter, list_predicate, overdue_predicate, upcoming_predicate},
};
use crate::task::{
    domain::{Task, TaskStatus, TaskUrgency},
    ports::{TaskOrder, TaskPredicate, TaskQuery, TaskRepository, Window},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Parameters of a paginated task listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasksRequest {
    filter: TaskListFilter,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl ListTasksRequest {
    /// Creates a request for the first page of non-deleted tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by case-insensitive title substring.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.filter.search = Some(search.into());
        self
    }

    /// Filters by exact status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.filter.status = Some(status);
        self
    }

    /// Filters by exact urgency.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: TaskUrgency) -> Self {
        self.filter.urgency = Some(urgency);
        self
    }

    /// Includes soft-deleted tasks in the listing.
    #[must_use]
    pub const fn including_deleted(mut self) -> Self {
        self.filter.include_deleted = true;
        self
    }

    /// Selects a 1-based page.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Overrides the configured page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Returns the filter portion of the request.
    #[must_use]
    pub const fn filter(&self) -> &TaskListFilter {
        &self.filter
    }
}

/// One page of a task listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// Tasks on this page, newest first.
    pub items: Vec<Task>,
    /// Number of tasks matching the filter across all pages.
    pub total_count: u64,
    /// 1-based page number that was served.
    pub page: u32,
    /// Page size that was applied.
    pub page_size: u32,
}

impl TaskPage {
    /// Number of pages needed to cover every match.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page_size.max(1)))
    }

    /// Whether a later page holds more matches.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

/// Task counts per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Tasks in the created status.
    pub created: u64,
    /// Tasks in progress.
    pub in_progress: u64,
    /// Completed tasks.
    pub completed: u64,
    /// Soft-deleted tasks.
    pub deleted: u64,
    /// Open tasks whose deadline has passed.
    pub overdue: u64,
    /// Created plus in-progress tasks.
    pub total_active: u64,
}

/// Task query service.
#[derive(Clone)]
pub struct TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: TaskQueryConfig,
}

impl<R, C> TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a query service with default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, TaskQueryConfig::default())
    }

    /// Creates a query service with explicit configuration.
    #[must_use]
    pub const fn with_config(repository: Arc<R>, clock: Arc<C>, config: TaskQueryConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskQueryConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Lists tasks matching the request filter, newest first.
    ///
    /// A page of zero is served as page 1. Pages past the end are empty but
    /// still report the full match count.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when persistence fails.
    pub async fn list_tasks(&self, request: ListTasksRequest) -> TaskServiceResult<TaskPage> {
        let ListTasksRequest {
            filter,
            page: requested_page,
            page_size: requested_size,
        } = request;
        let page = requested_page.unwrap_or(1).max(1);
        let page_size = requested_size
            .unwrap_or(self.config.default_page_size)
            .max(1);
        let predicate = list_predicate(&filter);

        let total_count = self.repository.count(&predicate).await?;
        let query = TaskQuery::new(predicate)
            .ordered_by(TaskOrder::CreatedAtDesc)
            .windowed(Window::page(page, page_size));
        let items = self.repository.find(&query).await?;
        debug!(page, page_size, total_count, returned = items.len(), "listed tasks");

        Ok(TaskPage {
            items,
            total_count,
            page,
            page_size,
        })
    }

    /// Open tasks whose deadline date is before today, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when persistence fails.
    pub async fn overdue_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        let today = self.today();
        let query = TaskQuery::new(overdue_predicate(today)).ordered_by(TaskOrder::DeadlineAsc);
        let tasks = self.repository.find(&query).await?;
        debug!(%today, count = tasks.len(), "loaded overdue tasks");
        Ok(tasks)
    }

    /// Number of overdue tasks.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when persistence fails.
    pub async fn overdue_count(&self) -> TaskServiceResult<u64> {
        Ok(self.repository.count(&overdue_predicate(self.today())).await?)
    }

    /// Open tasks due soon, earliest first.
    ///
    /// Overdue tasks are included because their deadline falls before the
    /// window end.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when persistence fails.
    pub async fn upcoming_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        let today = self.today();
        let query = TaskQuery::new(upcoming_predicate(today, &self.config))
            .ordered_by(TaskOrder::DeadlineAsc);
        let tasks = self.repository.find(&query).await?;
        debug!(%today, count = tasks.len(), "loaded upcoming tasks");
        Ok(tasks)
    }

    /// Counts tasks per status together with the overdue count.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when persistence fails.
    pub async fn stats(&self) -> TaskServiceResult<TaskStats> {
        let created = self.count_status(TaskStatus::Created).await?;
        let in_progress = self.count_status(TaskStatus::InProgress).await?;
        let completed = self.count_status(TaskStatus::Completed).await?;
        let deleted = self.count_status(TaskStatus::Deleted).await?;
        let overdue = self.overdue_count().await?;

        let stats = TaskStats {
            created,
            in_progress,
            completed,
            deleted,
            overdue,
            total_active: created + in_progress,
        };
        debug!(?stats, "computed task stats");
        Ok(stats)
    }

    async fn count_status(&self, status: TaskStatus) -> TaskServiceResult<u64> {
        Ok(self
            .repository
            .count(&TaskPredicate::StatusIs(status))
            .await?)
    }
}
