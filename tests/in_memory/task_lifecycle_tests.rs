//! In-memory integration tests for the repository contract and lifecycle
//! persistence.

use std::sync::Arc;

use super::helpers::{TaskServices, due_in, repository, services};
use chrono::NaiveTime;
use mockable::DefaultClock;
use rstest::rstest;
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskDeadline, TaskDetails, TaskId, TaskStatus, TaskTitle, TaskUrgency},
    ports::{TaskOrder, TaskPredicate, TaskQuery, TaskRepository, TaskRepositoryError, Window},
    services::TaskErrorKind,
};

fn new_task(title: &str) -> eyre::Result<Task> {
    let details = TaskDetails::new(
        TaskTitle::new(title)?,
        TaskDeadline::on(super::helpers::days_from_today(7)),
        TaskUrgency::Medium,
    );
    Ok(Task::new(details, &DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let task = new_task("Original")?;
    repository.store(&task).await?;

    let result = repository.store(&task).await;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected duplicate error, got {result:?}"
    );
    eyre::ensure!(repository.len()? == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_require_existing_record(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let task = new_task("Never stored")?;

    let updated = repository.update(&task).await;
    let deleted = repository.delete(task.id()).await;

    eyre::ensure!(matches!(updated, Err(TaskRepositoryError::NotFound(_))));
    eyre::ensure!(matches!(deleted, Err(TaskRepositoryError::NotFound(_))));
    eyre::ensure!(repository.is_empty()?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_applies_predicate_order_and_window(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let mut stored = Vec::new();
    for offset in [5_i64, 1, 3, 2, 4] {
        let details = TaskDetails::new(
            TaskTitle::new(format!("Due in {offset}"))?,
            TaskDeadline::on(super::helpers::days_from_today(offset)),
            TaskUrgency::Low,
        );
        let task = Task::new(details, &DefaultClock);
        repository.store(&task).await?;
        stored.push(task);
    }

    let query = TaskQuery::new(TaskPredicate::All)
        .ordered_by(TaskOrder::DeadlineAsc)
        .windowed(Window::page(2, 2));
    let page = repository.find(&query).await?;
    let titles: Vec<&str> = page.iter().map(|task| task.title().as_str()).collect();

    eyre::ensure!(titles == ["Due in 3", "Due in 4"], "unexpected page: {titles:?}");
    eyre::ensure!(repository.count(&TaskPredicate::All).await? == 5);
    eyre::ensure!(
        repository
            .count(&TaskPredicate::StatusIs(TaskStatus::Completed))
            .await?
            == 0
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_changes_are_visible_through_repository(
    services: TaskServices,
) -> eyre::Result<()> {
    let time = NaiveTime::from_hms_opt(8, 15, 0).ok_or_else(|| eyre::eyre!("invalid time"))?;
    let created = services
        .lifecycle
        .create_task(due_in("Renew passport", 10, TaskUrgency::High).with_deadline_time(time))
        .await?;

    services.lifecycle.start(created.id()).await?;
    let completed = services.lifecycle.complete(created.id()).await?;

    let stored = services
        .repository
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should be stored"))?;
    eyre::ensure!(stored == completed);
    eyre::ensure!(stored.status() == TaskStatus::Completed);
    eyre::ensure!(stored.deadline().time() == Some(time));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hard_delete_removes_record(services: TaskServices) -> eyre::Result<()> {
    let task = services
        .lifecycle
        .create_task(due_in("Temporary", 1, TaskUrgency::Low))
        .await?;
    services.lifecycle.delete(task.id()).await?;
    services.lifecycle.hard_delete(task.id()).await?;

    let lookup = services.lifecycle.get_task(task.id()).await;

    eyre::ensure!(matches!(lookup, Err(ref err) if err.kind() == TaskErrorKind::NotFound));
    eyre::ensure!(services.repository.is_empty()?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creations_are_all_persisted(services: TaskServices) -> eyre::Result<()> {
    let lifecycle = Arc::new(services.lifecycle);
    let mut handles = Vec::new();
    for index in 0..16 {
        let service = Arc::clone(&lifecycle);
        handles.push(tokio::spawn(async move {
            service
                .create_task(due_in(&format!("Parallel {index}"), index, TaskUrgency::Low))
                .await
        }));
    }

    let mut ids: Vec<TaskId> = Vec::new();
    for handle in handles {
        ids.push(handle.await??.id());
    }
    ids.sort();
    ids.dedup();

    eyre::ensure!(ids.len() == 16);
    eyre::ensure!(services.repository.len()? == 16);
    Ok(())
}
