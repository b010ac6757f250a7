use actix_web::web;
use diesel::QueryResult;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use uuid::Uuid;

use crate::{db_interaction::{insert_user_into_database, NewUserRecord}, domain::{UserRole, Username}, models::User, password::{hash_password, validate_password}, routes::ApiError, utils::{get_pooled_connection, DbConnection, DbPool}};

// Response of every registration endpoint
#[derive(Serialize, Debug)]
pub struct Registered<P>{
    pub user: User,
    pub profile: P
}

/// Validates the credentials, hashes the password and stores the user with
/// its role profile. A taken username surfaces as 400.
#[tracing::instrument(
    "Registering user",
    skip(pool, password, create_profile)
)]
pub async fn register_user<P, F>(
    pool: &web::Data<DbPool>,
    username: String,
    password: SecretString,
    role: UserRole,
    create_profile: F
) -> Result<Registered<P>, ApiError>
where
    F: FnOnce(&mut DbConnection, Uuid) -> QueryResult<P> + Send + 'static,
    P: Send + 'static
{
    let username = Username::parse(username).map_err(ApiError::BadRequest)?;
    validate_password(&password).map_err(ApiError::BadRequest)?;

    let password_hash = hash_password(password).await?;

    let record = NewUserRecord{
        username: username.inner(),
        password_hash: password_hash.expose_secret().to_string(),
        role
    };

    let conn = get_pooled_connection(pool).await?;
    let (user, profile) = insert_user_into_database(conn, record, create_profile).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Registered{ user, profile })
}
