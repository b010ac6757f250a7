pub mod admins;
pub mod authentication;
pub mod customers;
pub mod delivery_personnel;
pub mod error;
pub mod health_check;
pub mod restaurant_owners;

pub use authentication::*;
pub use error::ApiError;
pub use health_check::*;
