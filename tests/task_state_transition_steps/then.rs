//! Then steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use rstest_bdd_macros::then;
use tasklane::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskServiceError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.service.get_task(world.task_id()?))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("the operation fails with an invalid transition error")]
fn operation_fails_with_invalid_transition(
    world: &TaskTransitionWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    if !matches!(
        result,
        Err(TaskServiceError::Domain(
            TaskDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the task has no completion or deletion timestamp")]
fn task_has_no_lifecycle_stamps(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let stored = run_async(world.service.get_task(world.task_id()?))?;
    eyre::ensure!(
        stored.completed_at().is_none(),
        "unexpected completion timestamp"
    );
    eyre::ensure!(stored.deleted_at().is_none(), "unexpected deletion timestamp");
    Ok(())
}

#[then("the task can no longer be found")]
fn task_is_gone(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        matches!(world.last_result, Some(Ok(()))),
        "hard delete should have succeeded"
    );
    let lookup = run_async(world.service.find_by_id(world.task_id()?))?;
    eyre::ensure!(lookup.is_none(), "task should have been removed");
    Ok(())
}
