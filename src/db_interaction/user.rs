use chrono::Utc;
use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use uuid::Uuid;

use crate::{domain::UserRole, models::{User, UserChangeset}, schema::users, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::{conflict_on_unique_violation, DbError};

pub const USERNAME_TAKEN: &str = "User already exists";
pub const USER_NOT_FOUND: &str = "User not found";

// User row to insert, password is already hashed
pub struct NewUserRecord{
    pub username: String,
    pub password_hash: String,
    pub role: UserRole
}

impl NewUserRecord {
    fn into_user(self) -> User {
        User{
            id: Uuid::new_v4(),
            username: self.username,
            password_hash: self.password_hash,
            role: self.role.as_str().to_string(),
            active: true,
            created_at: Utc::now()
        }
    }
}

pub fn find_user_by_username(conn: &mut DbConnection, username: &str) -> QueryResult<Option<User>> {
    users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first::<User>(conn)
        .optional()
}

#[tracing::instrument(
    "Getting user by username",
    skip(conn)
)]
pub async fn get_user_by_username(
    mut conn: DbConnection,
    username: String
) -> Result<Option<User>, DbError> {
    Ok(spawn_blocking_with_tracing(move || {
        find_user_by_username(&mut conn, &username)
    })
    .await??)
}

#[tracing::instrument(
    "Listing users",
    skip_all
)]
pub async fn list_users(mut conn: DbConnection) -> Result<Vec<User>, DbError> {
    Ok(spawn_blocking_with_tracing(move || {
        users::table
            .order(users::created_at.asc())
            .select(User::as_select())
            .load::<User>(&mut conn)
    })
    .await??)
}

/// Inserts the user and its role profile in one transaction. `create_profile`
/// receives the new user's id; a taken username rolls both back.
#[tracing::instrument(
    "Inserting user into the database",
    skip_all,
    fields(username = %record.username, role = %record.role)
)]
pub async fn insert_user_into_database<P, F>(
    mut conn: DbConnection,
    record: NewUserRecord,
    create_profile: F
) -> Result<(User, P), DbError>
where
    F: FnOnce(&mut DbConnection, Uuid) -> QueryResult<P> + Send + 'static,
    P: Send + 'static
{
    let user = record.into_user();

    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let user = diesel::insert_into(users::table)
                .values(&user)
                .returning(User::as_returning())
                .get_result::<User>(conn)
                .map_err(conflict_on_unique_violation(USERNAME_TAKEN))?;

            let profile = create_profile(conn, user.id)?;

            Ok((user, profile))
        })
    })
    .await?
}

#[tracing::instrument(
    "Updating user",
    skip(conn, changes)
)]
pub async fn update_user(
    mut conn: DbConnection,
    user_id: Uuid,
    changes: UserChangeset
) -> Result<User, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let target = users::table.filter(users::id.eq(user_id));

            if changes.is_empty() {
                return target
                    .select(User::as_select())
                    .first::<User>(conn)
                    .optional()?
                    .ok_or(DbError::NotFound(USER_NOT_FOUND));
            }

            diesel::update(target)
                .set(&changes)
                .returning(User::as_returning())
                .get_result::<User>(conn)
                .optional()
                .map_err(conflict_on_unique_violation(USERNAME_TAKEN))?
                .ok_or(DbError::NotFound(USER_NOT_FOUND))
        })
    })
    .await?
}

// Soft delete, the row is kept with active = false
#[tracing::instrument(
    "Deactivating user",
    skip(conn)
)]
pub async fn deactivate_user(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<User, DbError> {
    spawn_blocking_with_tracing(move || -> Result<User, DbError> {
        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set(users::active.eq(false))
            .returning(User::as_returning())
            .get_result::<User>(&mut conn)
            .optional()?
            .ok_or(DbError::NotFound(USER_NOT_FOUND))
    })
    .await?
}

/// Creates the administrator unless the username is already taken.
/// Returns whether a row was inserted.
#[tracing::instrument(
    "Seeding bootstrap administrator",
    skip(conn, password_hash)
)]
pub async fn insert_admin_if_missing(
    mut conn: DbConnection,
    username: String,
    password_hash: String
) -> Result<bool, DbError> {
    let user = NewUserRecord{
        username,
        password_hash,
        role: UserRole::Administrator
    }.into_user();

    let inserted = spawn_blocking_with_tracing(move || {
        diesel::insert_into(users::table)
            .values(&user)
            .on_conflict(users::username)
            .do_nothing()
            .execute(&mut conn)
    })
    .await??;

    Ok(inserted > 0)
}
