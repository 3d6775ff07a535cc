//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{models::TaskRow, schema::tasks};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskDeadline, TaskId, TaskStatus, TaskTitle, TaskUrgency},
    ports::{
        TaskOrder, TaskPredicate, TaskQuery, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, Window,
    },
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Bool;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema applied when the adapter is initialized. Idempotent.
const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Boxed SQL condition over the `tasks` table.
type TaskCondition = Box<dyn BoxableExpression<tasks::table, Pg, SqlType = Bool>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    ///
    /// The caller is responsible for the schema; see [`Self::connect`] for a
    /// constructor that initializes it.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool and applies the task schema before returning.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be
    /// built or the schema cannot be applied.
    pub async fn connect(
        database_url: impl Into<String>,
        max_size: u32,
    ) -> TaskRepositoryResult<Self> {
        let url = database_url.into();
        let pool = tokio::task::spawn_blocking(move || {
            let manager = ConnectionManager::<PgConnection>::new(url);
            Pool::builder()
                .max_size(max_size)
                .build(manager)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
        .map_err(TaskRepositoryError::persistence)??;

        let repository = Self::new(pool);
        repository.initialize_schema().await?;
        tracing::info!(max_size, "task repository connected");
        Ok(repository)
    }

    /// Creates the `tasks` table and its indexes when missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the DDL fails.
    pub async fn initialize_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let request = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = tasks::table
                .into_boxed()
                .filter(to_condition(&request.predicate))
                .select(TaskRow::as_select());

            statement = match request.order {
                TaskOrder::CreatedAtDesc => {
                    statement.order_by((tasks::created_at.desc(), tasks::id.asc()))
                }
                TaskOrder::DeadlineAsc => {
                    statement.order_by((tasks::deadline_date.asc(), tasks::id.asc()))
                }
            };

            if let Some(window) = request.window {
                let (offset, limit) = window_bounds(window);
                statement = statement.offset(offset).limit(limit);
            }

            let rows = statement
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self, predicate: &TaskPredicate) -> TaskRepositoryResult<u64> {
        let condition = predicate.clone();
        self.run_blocking(move |connection| {
            let total = tasks::table
                .filter(to_condition(&condition))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Translates a storage-agnostic predicate into a SQL condition.
pub(super) fn to_condition(predicate: &TaskPredicate) -> TaskCondition {
    match predicate {
        TaskPredicate::All => Box::new(true.into_sql::<Bool>()),
        TaskPredicate::StatusIs(status) => Box::new(tasks::status.eq(status.as_str())),
        TaskPredicate::StatusIsNot(status) => Box::new(tasks::status.ne(status.as_str())),
        TaskPredicate::StatusNotIn(statuses) => {
            let values: Vec<String> = statuses
                .iter()
                .map(|status| status.as_str().to_owned())
                .collect();
            Box::new(tasks::status.ne_all(values))
        }
        TaskPredicate::UrgencyIs(urgency) => Box::new(tasks::urgency.eq(urgency.as_str())),
        TaskPredicate::DeadlineBefore(date) => Box::new(tasks::deadline_date.lt(*date)),
        TaskPredicate::DeadlineOnOrBefore(date) => Box::new(tasks::deadline_date.le(*date)),
        TaskPredicate::TitleContains(text) => {
            Box::new(tasks::title.ilike(format!("%{}%", escape_like(text))))
        }
        TaskPredicate::And(terms) => terms
            .iter()
            .map(to_condition)
            .reduce(|acc, next| -> TaskCondition { Box::new(acc.and(next)) })
            .unwrap_or_else(|| Box::new(true.into_sql::<Bool>())),
        TaskPredicate::Or(terms) => terms
            .iter()
            .map(to_condition)
            .reduce(|acc, next| -> TaskCondition { Box::new(acc.or(next)) })
            .unwrap_or_else(|| Box::new(false.into_sql::<Bool>())),
    }
}

/// Converts a window to SQL `OFFSET`/`LIMIT` values, saturating at `i64::MAX`.
///
/// A saturated offset lies past every row, so the page is empty.
pub(super) fn window_bounds(window: Window) -> (i64, i64) {
    let offset = i64::try_from(window.skip).unwrap_or(i64::MAX);
    let limit = i64::try_from(window.limit).unwrap_or(i64::MAX);
    (offset, limit)
}

/// Escapes `LIKE` wildcards so search text is matched literally.
pub(super) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub(super) fn to_row(task: &Task) -> TaskRow {
    let deadline = task.deadline();
    TaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        deadline_date: deadline.date(),
        deadline_time: deadline.time(),
        urgency: task.urgency().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
        deleted_at: task.deleted_at(),
    }
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        deadline_date,
        deadline_time,
        urgency,
        status,
        created_at,
        updated_at,
        completed_at,
        deleted_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        deadline: TaskDeadline::new(deadline_date, deadline_time),
        urgency: TaskUrgency::try_from(urgency.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
        completed_at,
        deleted_at,
    };
    Task::from_persisted(data).map_err(TaskRepositoryError::persistence)
}
