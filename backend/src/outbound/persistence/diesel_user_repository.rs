//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, NewUser, PasswordHash, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_lower_key";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn map_insert_error(error: DieselError, user: &NewUser) -> UserRepositoryError {
    match unique_violation_constraint(&error) {
        Some(USERNAME_CONSTRAINT) => UserRepositoryError::duplicate_username(user.username.as_str()),
        Some(EMAIL_CONSTRAINT) => UserRepositoryError::duplicate_email(user.email.as_str()),
        Some(other) => {
            warn!(constraint = other, "unrecognised unique violation on users");
            UserRepositoryError::query("unique constraint violated")
        }
        None => map_diesel_error(error),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let corrupted = |err: crate::domain::FieldViolation| {
        UserRepositoryError::query(format!("corrupted user {} in database: {err}", row.id))
    };
    let username = Username::parse(&row.username).map_err(corrupted)?;
    let email = EmailAddress::parse("email", &row.email).map_err(corrupted)?;

    Ok(User::from_new(
        UserId::new(row.id),
        NewUser {
            username,
            password_hash: PasswordHash::from_stored(row.password_hash),
            full_name: row.full_name,
            email,
            phone: row.phone,
            created_at: row.created_at,
        },
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .find(id.as_i64())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            username: user.username.as_str(),
            password_hash: user.password_hash.as_str(),
            full_name: &user.full_name,
            email: user.email.as_str(),
            phone: user.phone.as_deref(),
            created_at: user.created_at,
        };

        let id: i64 = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &user))?;

        Ok(User::from_new(UserId::new(id), user))
    }
}
