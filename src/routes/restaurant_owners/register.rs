use actix_web::{web, HttpResponse};
use secrecy::SecretString;
use serde::Deserialize;

use crate::{auth::jwt::Tokenizer, db_interaction::{insert_restaurant_profile, NewRestaurantProfile}, domain::{RequiredText, UserRole}, routes::{authenticate_user, register_user, ApiError, LoginForm}, utils::DbPool};

#[derive(Deserialize, Debug)]
pub struct RestaurantOwnerRegistration{
    pub username: String,
    pub password: SecretString,
    pub restaurant_name: String,
    pub address: String,
    pub hours_of_operation: String
}

#[tracing::instrument(
    "Registering restaurant owner",
    skip(pool, body),
    fields(username = %body.username)
)]
pub async fn register_restaurant_owner(
    pool: web::Data<DbPool>,
    body: web::Json<RestaurantOwnerRegistration>
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let profile = NewRestaurantProfile{
        restaurant_name: RequiredText::parse("restaurant_name", body.restaurant_name)
            .map_err(ApiError::BadRequest)?
            .inner(),
        address: RequiredText::parse("address", body.address).map_err(ApiError::BadRequest)?.inner(),
        hours_of_operation: RequiredText::parse("hours_of_operation", body.hours_of_operation)
            .map_err(ApiError::BadRequest)?
            .inner()
    };

    let registered = register_user(
        &pool,
        body.username,
        body.password,
        UserRole::RestaurantOwner,
        move |conn, user_id| insert_restaurant_profile(conn, user_id, profile)
    )
    .await?;

    Ok(HttpResponse::Ok().json(registered))
}

#[tracing::instrument(
    "Logging in restaurant owner",
    skip_all
)]
pub async fn login_restaurant_owner(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Form<LoginForm>
) -> Result<HttpResponse, ApiError> {
    let token = authenticate_user(&pool, &tokenizer, form.into_inner(), Some(UserRole::RestaurantOwner)).await?;

    Ok(HttpResponse::Ok().json(token))
}
