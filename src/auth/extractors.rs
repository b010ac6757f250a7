use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{domain::UserRole, routes::ApiError};

use super::jwt::{TokenError, Tokenizer};

/// Any holder of a valid bearer token. Identity and role come from the token
/// claims alone; the `active` flag is only checked at login, so a deactivated
/// user keeps access until the token expires.
#[derive(Debug)]
pub struct AuthenticatedUser{
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole
}

// Role guards, each carries the user id of the token subject
#[derive(Debug)]
pub struct IsCustomer(pub Uuid);

#[derive(Debug)]
pub struct IsRestaurantOwner(pub Uuid);

#[derive(Debug)]
pub struct IsDeliveryPersonnel(pub Uuid);

#[derive(Debug)]
pub struct IsAdmin(pub Uuid);

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let tokenizer = req.app_data::<web::Data<Tokenizer>>()
        .ok_or_else(|| ApiError::UnexpectedError(anyhow::anyhow!("Tokenizer missing from app data")))?;

    let token = bearer_token(req)
        .ok_or_else(|| ApiError::Unauthorized(TokenError::Invalid.to_string()))?;

    let claims = tokenizer.decode_key(token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    Ok(AuthenticatedUser{
        user_id: claims.sub,
        username: claims.username,
        role: claims.role
    })
}

fn authorize(req: &HttpRequest, role: UserRole) -> Result<Uuid, ApiError> {
    let user = authenticate(req)?;

    if user.role != role {
        tracing::info!(user_id = %user.user_id, role = %user.role, "Token role does not grant access");
        return Err(ApiError::Forbidden(format!("Requires the {} role", role)));
    }

    Ok(user.user_id)
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

impl FromRequest for IsCustomer {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authorize(req, UserRole::Customer).map(IsCustomer))
    }
}

impl FromRequest for IsRestaurantOwner {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authorize(req, UserRole::RestaurantOwner).map(IsRestaurantOwner))
    }
}

impl FromRequest for IsDeliveryPersonnel {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authorize(req, UserRole::DeliveryPersonnel).map(IsDeliveryPersonnel))
    }
}

impl FromRequest for IsAdmin {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authorize(req, UserRole::Administrator).map(IsAdmin))
    }
}
