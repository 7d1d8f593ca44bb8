//! Adapter-level behaviour of the `PostgreSQL` repositories.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rstest::rstest;
use taskmanager::binding::{
    adapters::postgres::PostgresBindingRepository,
    domain::{Binding, ChatId},
    ports::BindingRepository,
};
use taskmanager::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{DueAtChange, NewTask, Priority, TaskChangeset, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use taskmanager::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{NewUser, User, UserChangeset, UserId},
    ports::{UserRepository, UserRepositoryError},
};

use super::helpers::database_or_skip;

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn new_task(owner: UserId, title: &str, created_at: DateTime<Utc>) -> NewTask {
    NewTask {
        user_id: owner,
        title: title.to_owned(),
        description: String::new(),
        status: TaskStatus::Todo,
        priority: Priority::DEFAULT,
        due_at: None,
        created_at,
    }
}

async fn insert_user(users: &PostgresUserRepository, email: &str) -> eyre::Result<User> {
    Ok(users
        .insert(&NewUser {
            name: "Ann".to_owned(),
            email: email.to_owned(),
            created_at: now(),
        })
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_maps_to_domain_error() -> eyre::Result<()> {
    let database = database_or_skip!();
    let users = PostgresUserRepository::new(database.pool.clone());
    let ann = insert_user(&users, "ann@x.com").await?;
    let bob = insert_user(&users, "bob@x.com").await?;

    let duplicate = insert_user(&users, "ann@x.com").await;
    let stolen = users
        .update(bob.id(), &UserChangeset::new(now()).with_email("ann@x.com"))
        .await;

    let err = duplicate.expect_err("duplicate insert should fail");
    assert!(matches!(
        err.downcast_ref::<UserRepositoryError>(),
        Some(UserRepositoryError::DuplicateEmail(_))
    ));
    assert!(matches!(stolen, Err(UserRepositoryError::DuplicateEmail(_))));
    assert_eq!(users.find_by_email("ann@x.com").await?, Some(ann));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_for_missing_owner_is_rejected() -> eyre::Result<()> {
    let database = database_or_skip!();
    let tasks = PostgresTaskRepository::new(database.pool.clone());

    let result = tasks.insert(&new_task(UserId::new(404), "Orphan", now())).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::OwnerNotFound(id)) if id == UserId::new(404)
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_date_column_honours_keep_clear_and_set() -> eyre::Result<()> {
    let database = database_or_skip!();
    let users = PostgresUserRepository::new(database.pool.clone());
    let tasks = PostgresTaskRepository::new(database.pool.clone());
    let ann = insert_user(&users, "ann@x.com").await?;
    let due = now() + Duration::days(7);
    let task = tasks
        .insert(&NewTask {
            due_at: Some(due),
            ..new_task(ann.id(), "Ship", now())
        })
        .await?;

    let kept = tasks
        .update_owned(
            ann.id(),
            task.id(),
            &TaskChangeset::new(now()).with_title("Ship it"),
        )
        .await?
        .expect("owned task should update");
    let cleared = tasks
        .update_owned(
            ann.id(),
            task.id(),
            &TaskChangeset::new(now()).with_due_at(DueAtChange::Clear),
        )
        .await?
        .expect("owned task should update");
    let later = due + Duration::days(1);
    let set = tasks
        .update_owned(
            ann.id(),
            task.id(),
            &TaskChangeset::new(now()).with_due_at(DueAtChange::Set(later)),
        )
        .await?
        .expect("owned task should update");

    assert_eq!(kept.due_at(), Some(due));
    assert_eq!(kept.title(), "Ship it");
    assert_eq!(cleared.due_at(), None);
    assert_eq!(set.due_at(), Some(later));
    assert_eq!(tasks.find_by_id(task.id()).await?, Some(set));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conditional_writes_ignore_foreign_tasks() -> eyre::Result<()> {
    let database = database_or_skip!();
    let users = PostgresUserRepository::new(database.pool.clone());
    let tasks = PostgresTaskRepository::new(database.pool.clone());
    let ann = insert_user(&users, "ann@x.com").await?;
    let bob = insert_user(&users, "bob@x.com").await?;
    let task = tasks.insert(&new_task(ann.id(), "Private", now())).await?;

    let updated = tasks
        .update_owned(
            bob.id(),
            task.id(),
            &TaskChangeset::new(now()).with_status(TaskStatus::Done),
        )
        .await?;
    let deleted = tasks.delete_owned(bob.id(), task.id()).await?;

    assert_eq!(updated, None);
    assert!(!deleted);
    assert_eq!(tasks.find_by_id(task.id()).await?, Some(task));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_newest_first_and_user_delete_cascades() -> eyre::Result<()> {
    let database = database_or_skip!();
    let users = PostgresUserRepository::new(database.pool.clone());
    let tasks = PostgresTaskRepository::new(database.pool.clone());
    let ann = insert_user(&users, "ann@x.com").await?;
    let start = now();
    let older = tasks.insert(&new_task(ann.id(), "Older", start)).await?;
    let newer = tasks
        .insert(&new_task(ann.id(), "Newer", start + Duration::seconds(1)))
        .await?;

    let listed = tasks.list_by_owner(ann.id()).await?;
    let removed = users.delete(ann.id()).await?;

    assert_eq!(listed, vec![newer.clone(), older.clone()]);
    assert!(removed);
    assert_eq!(tasks.find_by_id(older.id()).await?, None);
    assert_eq!(tasks.find_by_id(newer.id()).await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn binding_upsert_replaces_the_chat() -> eyre::Result<()> {
    let database = database_or_skip!();
    let bindings = PostgresBindingRepository::new(database.pool.clone());

    bindings
        .upsert(&Binding::new("ann@x.com", ChatId::new(1), now()))
        .await?;
    let replaced = bindings
        .upsert(&Binding::new("ann@x.com", ChatId::new(2), now()))
        .await?;

    assert_eq!(replaced.chat_id(), ChatId::new(2));
    assert_eq!(
        bindings.find_chat_id("ann@x.com").await?,
        Some(ChatId::new(2))
    );
    assert_eq!(bindings.find_chat_id("bob@x.com").await?, None);
    Ok(())
}
