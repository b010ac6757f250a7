use actix_web::{web, HttpResponse};
use secrecy::SecretString;
use serde::Deserialize;

use crate::{auth::jwt::Tokenizer, db_interaction::{insert_customer_profile, NewCustomerProfile}, domain::{RequiredText, UserRole}, routes::{authenticate_user, register_user, ApiError, LoginForm}, utils::DbPool};

#[derive(Deserialize, Debug)]
pub struct CustomerRegistration{
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub delivery_address: String,
    pub payment_details: String
}

#[tracing::instrument(
    "Registering customer",
    skip(pool, body),
    fields(username = %body.username)
)]
pub async fn register_customer(
    pool: web::Data<DbPool>,
    body: web::Json<CustomerRegistration>
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let profile = NewCustomerProfile{
        name: RequiredText::parse("name", body.name).map_err(ApiError::BadRequest)?.inner(),
        delivery_address: RequiredText::parse("delivery_address", body.delivery_address)
            .map_err(ApiError::BadRequest)?
            .inner(),
        payment_details: RequiredText::parse("payment_details", body.payment_details)
            .map_err(ApiError::BadRequest)?
            .inner()
    };

    let registered = register_user(
        &pool,
        body.username,
        body.password,
        UserRole::Customer,
        move |conn, user_id| insert_customer_profile(conn, user_id, profile)
    )
    .await?;

    Ok(HttpResponse::Ok().json(registered))
}

#[tracing::instrument(
    "Logging in customer",
    skip_all
)]
pub async fn login_customer(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Form<LoginForm>
) -> Result<HttpResponse, ApiError> {
    let token = authenticate_user(&pool, &tokenizer, form.into_inner(), Some(UserRole::Customer)).await?;

    Ok(HttpResponse::Ok().json(token))
}
