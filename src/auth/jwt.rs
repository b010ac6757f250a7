use chrono::{Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{configuration::JWTSettings, domain::UserRole, models::User};

#[derive(Clone)]
pub struct Tokenizer{
    pub secret: SecretString,
    pub expiry_minutes: i64
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims{
    pub sub: Uuid,
    pub exp: usize,
    pub username: String,
    pub role: UserRole
}

#[derive(Error, Debug, PartialEq)]
pub enum TokenError{
    #[error("Token has expired")]
    Expired,
    #[error("Token is invalid")]
    Invalid
}

impl Tokenizer {
    pub fn new(settings: &JWTSettings) -> Self {
        Self{
            secret: SecretString::from(settings.secret.expose_secret().to_string()),
            expiry_minutes: settings.expiry_minutes
        }
    }

    #[tracing::instrument(
        "Issuing access token",
        skip_all,
        fields(user_id = %user.id)
    )]
    pub fn generate_key(&self, user: &User) -> Result<String, anyhow::Error>{
        let role = UserRole::parse(&user.role)
            .map_err(|e| anyhow::anyhow!(e))?;
        let expiry = Utc::now() + Duration::minutes(self.expiry_minutes);

        let claims = Claims{
            sub: user.id,
            exp: expiry.timestamp().max(0) as usize,
            username: user.username.clone(),
            role
        };

        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
        )
        .map_err(|e| anyhow::anyhow!("Failed to encode access token: {}", e))
    }

    pub fn decode_key(&self, token: &str) -> Result<Claims, TokenError>{
        jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256)
        )
        .map(|decoded_data| decoded_data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid
        })
    }
}
