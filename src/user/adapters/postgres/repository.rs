//! `PostgreSQL` repository implementation for user storage.

use super::models::{NewUserRow, UserChangesetRow, UserRow};
use crate::storage::postgres::{PgPool, run_blocking, schema::users};
use crate::user::{
    domain::{NewUser, User, UserChangeset, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let new_row = NewUserRow::from(user);
        run_blocking(&self.pool, move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(|err| map_write_error(err, &new_row.email))?;
            Ok(User::from(row))
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            Ok(row.map(User::from))
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> UserRepositoryResult<Option<User>> {
        let lookup_email = email.to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::email.eq(&lookup_email))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            Ok(row.map(User::from))
        })
        .await
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        run_blocking(&self.pool, move |connection| {
            let rows = users::table
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChangeset,
    ) -> UserRepositoryResult<Option<User>> {
        let changeset = UserChangesetRow::from(changes);
        run_blocking(&self.pool, move |connection| {
            let row = diesel::update(users::table.find(id.into_inner()))
                .set(&changeset)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .optional()
                .map_err(|err| {
                    map_write_error(err, changeset.email.as_deref().unwrap_or_default())
                })?;
            Ok(row.map(User::from))
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(users::table.find(id.into_inner()))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

/// Maps unique-constraint violations on `users.email` to a domain error.
pub(super) fn map_write_error(err: DieselError, email: &str) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateEmail(email.to_owned())
        }
        other => UserRepositoryError::persistence(other),
    }
}
