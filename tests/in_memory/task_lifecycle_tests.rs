//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Stack, stack};
use crate::test_helpers::timestamp;
use rstest::rstest;
use taskmanager::error::ErrorKind;
use taskmanager::task::{
    domain::{DueAtChange, Priority, TaskId, TaskStatus},
    services::{CreateTaskRequest, PatchTaskRequest, ReplaceTaskRequest, TaskServiceError},
};
use taskmanager::user::domain::UserId;
use taskmanager::validation::ValidationError;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_applies_defaults_and_round_trips(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;

    let created = stack
        .tasks
        .create_task(
            CreateTaskRequest::new(ann.id(), "Write spec")
                .with_status("")
                .with_priority(0),
        )
        .await
        .expect("creation should succeed");
    let fetched = stack
        .tasks
        .get_task_by_owner(ann.id(), created.id())
        .await
        .expect("owner fetch should succeed");

    assert_eq!(created.priority(), Priority::DEFAULT);
    assert_eq!(created.status(), TaskStatus::Todo);
    assert_eq!(created.due_at(), None);
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_for_missing_user_is_not_found(stack: Stack) {
    let result = stack
        .tasks
        .create_task(CreateTaskRequest::new(UserId::new(404), "Orphan"))
        .await;

    let err = result.expect_err("missing owner should fail");
    assert!(matches!(err, TaskServiceError::UserNotFound(id) if id == UserId::new(404)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_input_is_reported_before_the_missing_owner(stack: Stack) {
    let result = stack
        .tasks
        .create_task(CreateTaskRequest::new(UserId::new(404), "").with_priority(9))
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(ValidationError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_owner_scoped_and_newest_first(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;
    let bob = stack.user("Bob", "bob@x.com").await;
    let first = stack.task(ann.id(), "First").await;
    stack.task(bob.id(), "Not Ann's").await;
    let second = stack.task(ann.id(), "Second").await;

    let listed = stack
        .tasks
        .list_tasks_by_owner(ann.id())
        .await
        .expect("listing should succeed");
    let none = stack
        .tasks
        .list_tasks_by_owner(UserId::new(99))
        .await
        .expect("listing an unknown owner should succeed");

    assert_eq!(listed, vec![second, first]);
    assert!(none.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_date_patch_distinguishes_keep_clear_and_set(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;
    let due = timestamp("2026-06-10T17:00:00Z");
    let later = timestamp("2026-07-01T09:30:00Z");
    let task = stack
        .tasks
        .create_task(CreateTaskRequest::new(ann.id(), "Ship").with_due_at(due))
        .await
        .expect("creation should succeed");

    let kept = stack
        .tasks
        .patch_task(ann.id(), task.id(), PatchTaskRequest::new().with_title("Ship it"))
        .await
        .expect("title patch should succeed");
    let moved = stack
        .tasks
        .patch_task(
            ann.id(),
            task.id(),
            PatchTaskRequest::new().with_due_at(DueAtChange::Set(later)),
        )
        .await
        .expect("due date patch should succeed");
    let cleared = stack
        .tasks
        .patch_task(
            ann.id(),
            task.id(),
            PatchTaskRequest::new().with_due_at(DueAtChange::Clear),
        )
        .await
        .expect("clearing patch should succeed");

    assert_eq!(kept.due_at(), Some(due));
    assert_eq!(moved.due_at(), Some(later));
    assert_eq!(cleared.due_at(), None);
    assert_eq!(cleared.title(), "Ship it");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replace_overwrites_every_field_without_defaults(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;
    let task = stack
        .tasks
        .create_task(
            CreateTaskRequest::new(ann.id(), "Draft")
                .with_description("rough")
                .with_due_at(timestamp("2026-03-01T00:00:00Z")),
        )
        .await
        .expect("creation should succeed");

    let replaced = stack
        .tasks
        .replace_task(
            ann.id(),
            task.id(),
            ReplaceTaskRequest::new("Final", "", "in_progress", 5, None),
        )
        .await
        .expect("replace should succeed");
    let rejected = stack
        .tasks
        .replace_task(
            ann.id(),
            task.id(),
            ReplaceTaskRequest::new("Final", "", "", 0, None),
        )
        .await;

    assert_eq!(replaced.title(), "Final");
    assert_eq!(replaced.description(), "");
    assert_eq!(replaced.status(), TaskStatus::InProgress);
    assert_eq!(replaced.priority().value(), 5);
    assert_eq!(replaced.due_at(), None);
    assert_eq!(replaced.created_at(), task.created_at());
    assert!(matches!(
        rejected,
        Err(TaskServiceError::Validation(ValidationError::BadStatus(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_owner_removes_its_tasks(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;
    let task = stack.task(ann.id(), "Doomed").await;

    stack
        .users
        .delete_user(ann.id())
        .await
        .expect("user delete should succeed");
    let result = stack.tasks.get_task(task.id()).await;

    assert!(matches!(result, Err(TaskServiceError::NotFound(id)) if id == task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone_for_its_owner(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;
    let task = stack.task(ann.id(), "Done soon").await;

    stack
        .tasks
        .delete_task_by_owner(ann.id(), task.id())
        .await
        .expect("owner delete should succeed");
    let again = stack.tasks.delete_task_by_owner(ann.id(), task.id()).await;
    let missing = stack.tasks.get_task(TaskId::new(999)).await;

    assert!(matches!(again, Err(TaskServiceError::NotFound(_))));
    assert!(matches!(missing, Err(TaskServiceError::NotFound(_))));
}
