use actix_web::{web, Scope};

pub mod orders;
pub mod reports;
pub mod users;

pub use orders::*;
pub use reports::*;
pub use users::*;

pub fn scope() -> Scope {
    web::scope("/admins")
        .route("/users/create", web::post().to(create_user))
        .route("/users", web::get().to(view_users))
        .route("/users/{user_id}", web::put().to(edit_user))
        .route("/users/{user_id}", web::delete().to(remove_user))
        .route("/orders", web::get().to(view_all_orders))
        .route("/orders/{order_id}", web::put().to(manage_order))
        .route("/reports/{report_type}", web::get().to(generate_report))
        .route("/activity", web::get().to(monitor_activity))
}
