use actix_web::{web, HttpResponse};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{auth::jwt::Tokenizer, db_interaction::get_user_by_username, domain::UserRole, password::verify_password, routes::ApiError, utils::{get_pooled_connection, DbPool}};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub username: String,
    pub password: SecretString
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Token{
    pub access_token: String,
    pub token_type: String
}

impl Token {
    fn bearer(access_token: String) -> Self {
        Token{
            access_token,
            token_type: "bearer".to_string()
        }
    }
}

/// Checks the credentials and issues an access token. With `required_role`
/// set, users holding another role are rejected like a wrong password.
#[tracing::instrument(
    "Authenticating user",
    skip(pool, tokenizer, form),
    fields(username = %form.username)
)]
pub async fn authenticate_user(
    pool: &web::Data<DbPool>,
    tokenizer: &Tokenizer,
    form: LoginForm,
    required_role: Option<UserRole>
) -> Result<Token, ApiError> {
    let conn = get_pooled_connection(pool).await?;

    let user = get_user_by_username(conn, form.username.trim().to_string())
        .await?
        .ok_or_else(|| ApiError::BadRequest(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(form.password, user.password_hash.clone()).await? {
        tracing::info!("Passwords did not match");
        return Err(ApiError::BadRequest(INVALID_CREDENTIALS.to_string()));
    }

    if let Some(role) = required_role {
        if user.role != role.as_str() {
            tracing::info!(role = %user.role, "User does not hold the required role");
            return Err(ApiError::BadRequest(INVALID_CREDENTIALS.to_string()));
        }
    }

    if !user.active {
        return Err(ApiError::BadRequest("User is deactivated".to_string()));
    }

    Ok(Token::bearer(tokenizer.generate_key(&user)?))
}

#[tracing::instrument(
    "Logging in user",
    skip_all
)]
pub async fn login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Form<LoginForm>
) -> Result<HttpResponse, ApiError> {
    let token = authenticate_user(&pool, &tokenizer, form.into_inner(), None).await?;

    Ok(HttpResponse::Ok().json(token))
}
