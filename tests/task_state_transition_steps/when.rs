//! When steps for task state transition BDD scenarios.

use super::world::TaskTransitionWorld;
use rstest_bdd_macros::when;

#[when(r#""{operation}" is applied to the task"#)]
fn apply_operation(world: &mut TaskTransitionWorld, operation: String) -> Result<(), eyre::Report> {
    let result = world.apply(&operation)?;
    world.last_result = Some(result);
    Ok(())
}
