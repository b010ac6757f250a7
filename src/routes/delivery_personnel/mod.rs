use actix_web::{web, Scope};

pub mod deliveries;
pub mod register;

pub use deliveries::*;
pub use register::*;

pub fn scope() -> Scope {
    web::scope("/delivery_personnel")
        .route("/register", web::post().to(register_delivery_personnel))
        .route("/login", web::post().to(login_delivery_personnel))
        .route("/deliveries", web::get().to(view_available_deliveries))
        .route("/deliveries/status/{delivery_id}", web::put().to(update_status))
        .route("/deliveries/{delivery_id}", web::put().to(accept_delivery_request))
        .route("/availability", web::put().to(update_availability))
}
