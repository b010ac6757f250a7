use actix_web::{web, HttpResponse};
use secrecy::SecretString;
use serde::Deserialize;

use crate::{auth::jwt::Tokenizer, db_interaction::{insert_delivery_personnel_profile, NewDeliveryPersonnelProfile}, domain::{RequiredText, UserRole}, routes::{authenticate_user, register_user, ApiError, LoginForm}, utils::DbPool};

#[derive(Deserialize, Debug)]
pub struct DeliveryPersonnelRegistration{
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub contact_details: String,
    pub vehicle_type: String
}

#[tracing::instrument(
    "Registering delivery personnel",
    skip(pool, body),
    fields(username = %body.username)
)]
pub async fn register_delivery_personnel(
    pool: web::Data<DbPool>,
    body: web::Json<DeliveryPersonnelRegistration>
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let profile = NewDeliveryPersonnelProfile{
        name: RequiredText::parse("name", body.name).map_err(ApiError::BadRequest)?.inner(),
        contact_details: RequiredText::parse("contact_details", body.contact_details)
            .map_err(ApiError::BadRequest)?
            .inner(),
        vehicle_type: RequiredText::parse("vehicle_type", body.vehicle_type)
            .map_err(ApiError::BadRequest)?
            .inner()
    };

    let registered = register_user(
        &pool,
        body.username,
        body.password,
        UserRole::DeliveryPersonnel,
        move |conn, user_id| insert_delivery_personnel_profile(conn, user_id, profile)
    )
    .await?;

    Ok(HttpResponse::Ok().json(registered))
}

#[tracing::instrument(
    "Logging in delivery personnel",
    skip_all
)]
pub async fn login_delivery_personnel(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Form<LoginForm>
) -> Result<HttpResponse, ApiError> {
    let token = authenticate_user(&pool, &tokenizer, form.into_inner(), Some(UserRole::DeliveryPersonnel)).await?;

    Ok(HttpResponse::Ok().json(token))
}
