//! When steps for task ownership BDD scenarios.

use super::world::{OwnershipWorld, run_async};
use rstest_bdd_macros::when;
use taskmanager::task::{
    domain::DueAtChange,
    services::{CreateTaskRequest, PatchTaskRequest},
};
use taskmanager::user::domain::UserId;

#[when(
    r#"the user creates a task titled "{title}" with priority {priority:i64} and an empty status"#
)]
fn create_task_with_defaults(
    world: &mut OwnershipWorld,
    title: String,
    priority: i64,
) -> Result<(), eyre::Report> {
    let owner = world.owner()?.id();
    let request = CreateTaskRequest::new(owner, title)
        .with_status("")
        .with_priority(priority);
    let task = run_async(world.tasks.create_task(request))
        .map_err(|err| eyre::eyre!("unexpected task creation failure: {err}"))?;
    world.remember_created(task);
    Ok(())
}

#[when(r#"user {user_id:i64} creates a task titled "{title}""#)]
fn user_creates_task(world: &mut OwnershipWorld, user_id: i64, title: String) {
    let request = CreateTaskRequest::new(UserId::new(user_id), title);
    match run_async(world.tasks.create_task(request)) {
        Ok(task) => world.remember_created(task),
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#"the owner patches the task status to "{status}""#)]
fn owner_patches_status(world: &mut OwnershipWorld, status: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?.id();
    let task_id = world.current_task()?.id();
    let patched = run_async(world.tasks.patch_task(
        owner,
        task_id,
        PatchTaskRequest::new().with_status(status),
    ))
    .map_err(|err| eyre::eyre!("unexpected patch failure: {err}"))?;
    world.current_task = Some(patched);
    Ok(())
}

#[when("the owner clears the task's due date")]
fn owner_clears_due_date(world: &mut OwnershipWorld) -> Result<(), eyre::Report> {
    let owner = world.owner()?.id();
    let task_id = world.current_task()?.id();
    let patched = run_async(world.tasks.patch_task(
        owner,
        task_id,
        PatchTaskRequest::new().with_due_at(DueAtChange::Clear),
    ))
    .map_err(|err| eyre::eyre!("unexpected patch failure: {err}"))?;
    world.current_task = Some(patched);
    Ok(())
}

#[when("user {user_id:i64} deletes the task")]
fn user_deletes_task(world: &mut OwnershipWorld, user_id: i64) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?.id();
    if let Err(err) =
        run_async(world.tasks.delete_task_by_owner(UserId::new(user_id), task_id))
    {
        world.last_error = Some(err);
    }
    Ok(())
}
