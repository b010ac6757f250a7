use actix_web::{web, HttpResponse};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsAdmin, db_interaction::{deactivate_user, insert_user_into_database, list_users, update_user, NewUserRecord}, domain::{UserRole, Username}, models::UserChangeset, password::{hash_password, validate_password}, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct CreateUserRequest{
    pub username: String,
    pub password: SecretString,
    pub role: String
}

#[derive(Deserialize, Debug)]
pub struct UpdateUserRequest{
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub role: Option<String>
}

#[tracing::instrument(
    "Creating user as administrator",
    skip(pool, body, _admin),
    fields(username = %body.username)
)]
pub async fn create_user(
    pool: web::Data<DbPool>,
    body: web::Json<CreateUserRequest>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let username = Username::parse(body.username).map_err(ApiError::BadRequest)?;
    let role = UserRole::parse(&body.role).map_err(ApiError::BadRequest)?;
    validate_password(&body.password).map_err(ApiError::BadRequest)?;

    let password_hash = hash_password(body.password).await?;
    let record = NewUserRecord{
        username: username.inner(),
        password_hash: password_hash.expose_secret().to_string(),
        role
    };

    let conn = get_pooled_connection(&pool).await?;
    let (user, _) = insert_user_into_database(conn, record, |_, _| Ok(())).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(
    "Listing users as administrator",
    skip_all
)]
pub async fn view_users(
    pool: web::Data<DbPool>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(list_users(conn).await?))
}

#[tracing::instrument(
    "Updating user as administrator",
    skip(pool, body, _admin)
)]
pub async fn edit_user(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let username = body.username
        .map(Username::parse)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let role = body.role
        .map(|r| UserRole::parse(&r))
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let password_hash = match body.password {
        Some(password) => {
            validate_password(&password).map_err(ApiError::BadRequest)?;
            Some(hash_password(password).await?.expose_secret().to_string())
        },
        None => None
    };

    let changes = UserChangeset{
        username: username.map(|u| u.inner()),
        password_hash,
        role: role.map(|r| r.as_str().to_string())
    };

    let conn = get_pooled_connection(&pool).await?;
    let user = update_user(conn, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(
    "Deactivating user as administrator",
    skip(pool, _admin)
)]
pub async fn remove_user(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let user = deactivate_user(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user))
}
