use std::{error::Error, fmt::Debug};

use thiserror::Error;

use crate::utils::error_fmt_chain;

pub mod customer;
pub mod delivery;
pub mod menu;
pub mod orders;
pub mod reports;
pub mod restaurant;
pub mod user;

pub use customer::*;
pub use delivery::*;
pub use menu::*;
pub use orders::*;
pub use reports::*;
pub use restaurant::*;
pub use user::*;

// Error returned by every data-access function
#[derive(Error)]
pub enum DbError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    QueryError(#[from] diesel::result::Error),
    #[error("Failed due to internal error")]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str)
}

impl Debug for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

pub(crate) fn is_unique_violation(error: &diesel::result::Error) -> bool {
    matches!(
        error,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _
        )
    )
}

// Maps a unique constraint violation to a Conflict carrying `message`
pub(crate) fn conflict_on_unique_violation(message: &'static str) -> impl Fn(diesel::result::Error) -> DbError {
    move |error| {
        if is_unique_violation(&error) {
            DbError::Conflict(message)
        } else {
            DbError::QueryError(error)
        }
    }
}
