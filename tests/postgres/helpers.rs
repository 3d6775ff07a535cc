//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Days, NaiveDate, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};
use pg_embedded_setup_unpriv::{ClusterHandle, TestCluster};
use rstest::fixture;
use tasklane::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    domain::{PersistedTaskData, Task, TaskDeadline, TaskId, TaskStatus, TaskTitle, TaskUrgency},
    services::{TaskLifecycleService, TaskQueryService},
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// SQL that creates the `tasks` table and its indexes.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "tasklane_test_template";

static SHARED_CLUSTER: OnceLock<Option<ClusterHandle>> = OnceLock::new();

/// Starts the shared embedded cluster once, or reports it as unavailable.
pub fn shared_cluster() -> Option<&'static ClusterHandle> {
    SHARED_CLUSTER
        .get_or_init(|| match TestCluster::new_split() {
            Ok((cluster, guard)) => {
                // The shared cluster lives for the whole process, as a static would.
                std::mem::forget(guard);
                Some(cluster)
            }
            Err(err) => {
                tracing::warn!(%err, "embedded PostgreSQL unavailable; skipping test");
                None
            }
        })
        .as_ref()
}

/// Creates a current-thread runtime for driving async repository calls.
pub fn test_runtime() -> eyre::Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with the task schema applied.
pub fn ensure_template(cluster: &ClusterHandle) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_TASKS_SQL)
                .map_err(|e| eyre::eyre!("{e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("{e}"))
}

/// Database cloned from the template and dropped with the guard.
pub struct TestDatabase {
    cluster: &'static ClusterHandle,
    name: String,
}

impl TestDatabase {
    fn create(cluster: &'static ClusterHandle) -> eyre::Result<Self> {
        let name = format!("task_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("{e}"))?;
        Ok(Self { cluster, name })
    }

    /// Connection URL for this database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.connection().database_url(&self.name)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.name.as_str()) {
            tracing::warn!(database = %self.name, %err, "failed to drop test database");
        }
    }
}

/// Lifecycle service over the `PostgreSQL` adapter.
pub type Lifecycle = TaskLifecycleService<PostgresTaskRepository, DefaultClock>;

/// Query service over the `PostgreSQL` adapter.
pub type Queries = TaskQueryService<PostgresTaskRepository, DefaultClock>;

/// Repository and services bound to one temporary database.
///
/// The database field is declared last so the pool closes before the drop.
pub struct PostgresContext {
    pub repository: Arc<PostgresTaskRepository>,
    pub lifecycle: Lifecycle,
    pub queries: Queries,
    pub database: TestDatabase,
}

/// Provides a fresh migrated database, or `None` without a cluster.
#[fixture]
pub fn context() -> eyre::Result<Option<PostgresContext>> {
    let Some(cluster) = shared_cluster() else {
        return Ok(None);
    };
    ensure_template(cluster)?;
    let database = TestDatabase::create(cluster)?;

    let manager = ConnectionManager::<PgConnection>::new(database.url());
    let pool: TaskPgPool = Pool::builder().max_size(2).build(manager)?;
    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let clock = Arc::new(DefaultClock);
    Ok(Some(PostgresContext {
        lifecycle: TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock)),
        queries: TaskQueryService::new(Arc::clone(&repository), clock),
        repository,
        database,
    }))
}

/// Today's UTC date according to the system clock.
#[must_use]
pub fn today() -> NaiveDate {
    DefaultClock.utc().date_naive()
}

/// Date `offset` days away from today; negative offsets go back in time.
#[must_use]
pub fn days_from_today(offset: i64) -> NaiveDate {
    let magnitude = Days::new(offset.unsigned_abs());
    let shifted = if offset < 0 {
        today().checked_sub_days(magnitude)
    } else {
        today().checked_add_days(magnitude)
    };
    shifted.unwrap_or_else(today)
}

/// Builds a created task with a whole-second creation time.
///
/// Whole seconds survive the microsecond precision of `TIMESTAMPTZ`, so
/// tasks read back compare equal.
pub fn seeded_task(
    title: &str,
    deadline: NaiveDate,
    created_at: DateTime<Utc>,
) -> eyre::Result<Task> {
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new(title)?,
        deadline: TaskDeadline::on(deadline),
        urgency: TaskUrgency::Medium,
        status: TaskStatus::Created,
        created_at,
        updated_at: None,
        completed_at: None,
        deleted_at: None,
    })?)
}

/// Creation time `seconds` after a fixed epoch.
pub fn at_second(seconds: i64) -> eyre::Result<DateTime<Utc>> {
    DateTime::from_timestamp(1_780_000_000 + seconds, 0)
        .ok_or_else(|| eyre::eyre!("timestamp out of range"))
}

/// Compares two tasks, truncating timestamps to the stored precision.
pub fn ensure_same_record(actual: &Task, expected: &Task) -> eyre::Result<()> {
    let micros = |stamp: Option<DateTime<Utc>>| stamp.map(|value| value.timestamp_micros());
    eyre::ensure!(actual.id() == expected.id());
    eyre::ensure!(actual.title() == expected.title());
    eyre::ensure!(actual.deadline() == expected.deadline());
    eyre::ensure!(actual.urgency() == expected.urgency());
    eyre::ensure!(actual.status() == expected.status());
    eyre::ensure!(micros(Some(actual.created_at())) == micros(Some(expected.created_at())));
    eyre::ensure!(micros(actual.updated_at()) == micros(expected.updated_at()));
    eyre::ensure!(micros(actual.completed_at()) == micros(expected.completed_at()));
    eyre::ensure!(micros(actual.deleted_at()) == micros(expected.deleted_at()));
    Ok(())
}
