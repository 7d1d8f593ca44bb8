//! Services running end to end over `PostgreSQL`.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use taskmanager::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{DueAtChange, TaskStatus},
    services::{CreateTaskRequest, PatchTaskRequest, TaskService, TaskServiceError},
};
use taskmanager::user::{
    adapters::postgres::PostgresUserRepository,
    services::{CreateUserRequest, UserService},
};

use super::helpers::database_or_skip;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_reads_back_identically() -> eyre::Result<()> {
    let database = database_or_skip!();
    let user_repository = Arc::new(PostgresUserRepository::new(database.pool.clone()));
    let clock = Arc::new(DefaultClock);
    let users = UserService::new(Arc::clone(&user_repository), Arc::clone(&clock));
    let tasks = TaskService::new(
        Arc::new(PostgresTaskRepository::new(database.pool.clone())),
        user_repository,
        clock,
    );
    let ann = users
        .create_user(CreateUserRequest::new("Ann", "ann@x.com"))
        .await?;

    let created = tasks
        .create_task(
            CreateTaskRequest::new(ann.id(), "Write spec")
                .with_status("")
                .with_priority(0),
        )
        .await?;
    let fetched = tasks.get_task_by_owner(ann.id(), created.id()).await?;

    assert_eq!(fetched, created);
    assert_eq!(fetched.status(), TaskStatus::Todo);
    assert_eq!(fetched.priority().value(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_patch_and_missing_owner_are_not_found() -> eyre::Result<()> {
    let database = database_or_skip!();
    let user_repository = Arc::new(PostgresUserRepository::new(database.pool.clone()));
    let clock = Arc::new(DefaultClock);
    let users = UserService::new(Arc::clone(&user_repository), Arc::clone(&clock));
    let tasks = TaskService::new(
        Arc::new(PostgresTaskRepository::new(database.pool.clone())),
        user_repository,
        clock,
    );
    let ann = users
        .create_user(CreateUserRequest::new("Ann", "ann@x.com"))
        .await?;
    let bob = users
        .create_user(CreateUserRequest::new("Bob", "bob@x.com"))
        .await?;
    let task = tasks
        .create_task(CreateTaskRequest::new(ann.id(), "Private"))
        .await?;

    let foreign = tasks
        .patch_task(
            bob.id(),
            task.id(),
            PatchTaskRequest::new().with_due_at(DueAtChange::Clear),
        )
        .await;
    users.delete_user(ann.id()).await?;
    let orphan = tasks
        .create_task(CreateTaskRequest::new(ann.id(), "Too late"))
        .await;

    assert!(matches!(foreign, Err(TaskServiceError::NotFound(id)) if id == task.id()));
    assert!(matches!(orphan, Err(TaskServiceError::UserNotFound(id)) if id == ann.id()));
    Ok(())
}
