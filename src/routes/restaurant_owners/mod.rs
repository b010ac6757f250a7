use actix_web::{web, Scope};

pub mod menu;
pub mod orders;
pub mod register;

pub use menu::*;
pub use orders::*;
pub use register::*;

pub fn scope() -> Scope {
    web::scope("/restaurant_owners")
        .route("/register", web::post().to(register_restaurant_owner))
        .route("/login", web::post().to(login_restaurant_owner))
        .route("/menu", web::post().to(add_menu_item))
        .route("/menu/{menu_id}", web::put().to(edit_menu_item))
        .route("/menu/{menu_id}", web::delete().to(remove_menu_item))
        .route("/orders", web::get().to(view_orders))
        .route("/orders/{order_id}", web::put().to(update_order_status))
        .route("/orders/{order_id}/delivery", web::post().to(request_delivery))
        .route("/restaurant", web::put().to(update_restaurant))
}
