use actix_web::{web, Scope};

pub mod browse;
pub mod orders;
pub mod register;

pub use browse::*;
pub use orders::*;
pub use register::*;

pub fn scope() -> Scope {
    web::scope("/customers")
        .route("/register", web::post().to(register_customer))
        .route("/login", web::post().to(login_customer))
        .route("/restaurants", web::get().to(browse_restaurants))
        .route("/restaurants/{restaurant_id}/menu", web::get().to(view_menu))
        .route("/search-menu", web::get().to(search_menu))
        .route("/order", web::post().to(place_customer_order))
        .route("/order/{order_id}", web::get().to(track_order))
        .route("/order-history", web::get().to(order_history))
        .route("/reorder/{order_id}", web::post().to(reorder_previous))
}
