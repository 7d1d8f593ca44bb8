//! In-memory integration tests for user lifecycle operations.

use super::helpers::{Stack, stack};
use rstest::rstest;
use taskmanager::error::ErrorKind;
use taskmanager::user::{
    domain::UserId,
    ports::UserRepositoryError,
    services::{CreateUserRequest, PatchUserRequest, ReplaceUserRequest, UserServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_user_is_listed_and_found_by_email(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;
    let bob = stack.user("Bob", "bob@x.com").await;

    let listed = stack.users.list_users().await.expect("list should succeed");
    let by_email = stack
        .users
        .find_by_email("bob@x.com")
        .await
        .expect("lookup should succeed");

    assert_eq!(listed, vec![ann.clone(), bob.clone()]);
    assert_eq!(by_email, bob);
    assert_eq!(ann.created_at(), ann.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected_on_create_and_update(stack: Stack) {
    stack.user("Ann", "ann@x.com").await;
    let bob = stack.user("Bob", "bob@x.com").await;

    let duplicate = stack
        .users
        .create_user(CreateUserRequest::new("Ann again", "ann@x.com"))
        .await;
    let stolen = stack
        .users
        .patch_user(bob.id(), PatchUserRequest::new().with_email("ann@x.com"))
        .await;

    assert!(matches!(
        duplicate,
        Err(UserServiceError::Repository(UserRepositoryError::DuplicateEmail(_)))
    ));
    assert!(matches!(
        stolen,
        Err(UserServiceError::Repository(UserRepositoryError::DuplicateEmail(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replace_rewrites_both_fields_and_bumps_updated_at(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;

    let replaced = stack
        .users
        .replace_user(ann.id(), ReplaceUserRequest::new("Anne", "anne@x.com"))
        .await
        .expect("replace should succeed");

    assert_eq!(replaced.name(), "Anne");
    assert_eq!(replaced.email(), "anne@x.com");
    assert_eq!(replaced.created_at(), ann.created_at());
    assert!(replaced.updated_at() > ann.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_patch_on_missing_user_is_not_found(stack: Stack) {
    let result = stack
        .users
        .patch_user(UserId::new(42), PatchUserRequest::new())
        .await;

    let err = result.expect_err("missing user should fail");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_user_twice_reports_not_found(stack: Stack) {
    let ann = stack.user("Ann", "ann@x.com").await;

    stack
        .users
        .delete_user(ann.id())
        .await
        .expect("first delete should succeed");
    let second = stack.users.delete_user(ann.id()).await;

    assert!(matches!(second, Err(UserServiceError::NotFound(id)) if id == ann.id()));
}
