use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::{db_interaction::DbError, utils::{error_fmt_chain, PoolGetError}};

// Error returned by every handler, rendered as {"detail": "..."}
#[derive(Error)]
pub enum ApiError{
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed due to internal error")]
    UnexpectedError(#[from] anyhow::Error)
}

#[derive(Serialize)]
struct ErrorBody<'a>{
    detail: &'a str
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if let ApiError::UnexpectedError(_) = self {
            tracing::error!("{:?}", self);
        }

        let detail = self.to_string();
        HttpResponse::build(self.status_code()).json(ErrorBody{ detail: &detail })
    }
}

impl From<DbError> for ApiError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::NotFound(message) => ApiError::NotFound(message.to_string()),
            DbError::Conflict(message) => ApiError::BadRequest(message.to_string()),
            other => ApiError::UnexpectedError(anyhow::anyhow!("{:?}", other))
        }
    }
}

impl From<PoolGetError> for ApiError {
    fn from(error: PoolGetError) -> Self {
        ApiError::UnexpectedError(anyhow::anyhow!("{:?}", error))
    }
}
