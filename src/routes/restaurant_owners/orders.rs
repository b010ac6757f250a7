use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::extractors::IsRestaurantOwner, db_interaction::{create_delivery_for_order, get_restaurant_orders, update_restaurant_details, update_restaurant_order_status}, domain::{RequiredText, StatusText}, models::RestaurantOwnerChangeset, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct StatusUpdate{
    pub status: String
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StatusUpdated{
    pub msg: String,
    pub status: String
}

#[derive(Deserialize, Debug, Default)]
pub struct RestaurantUpdate{
    pub restaurant_name: Option<String>,
    pub address: Option<String>,
    pub hours_of_operation: Option<String>
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RestaurantUpdated{
    pub msg: String,
    pub restaurant_name: String
}

fn optional_text(field: &str, value: Option<String>) -> Result<Option<String>, ApiError> {
    value
        .map(|v| RequiredText::parse(field, v).map(RequiredText::inner))
        .transpose()
        .map_err(ApiError::BadRequest)
}

#[tracing::instrument(
    "Viewing incoming orders",
    skip(pool, owner)
)]
pub async fn view_orders(
    pool: web::Data<DbPool>,
    owner: IsRestaurantOwner
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let orders = get_restaurant_orders(conn, owner.0).await?;

    if orders.is_empty() {
        return Err(ApiError::NotFound("No orders found".to_string()));
    }

    Ok(HttpResponse::Ok().json(orders))
}

#[tracing::instrument(
    "Updating incoming order status",
    skip(pool, owner)
)]
pub async fn update_order_status(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<StatusUpdate>,
    owner: IsRestaurantOwner
) -> Result<HttpResponse, ApiError> {
    let status = StatusText::parse(body.into_inner().status).map_err(ApiError::BadRequest)?;

    let conn = get_pooled_connection(&pool).await?;
    let order = update_restaurant_order_status(conn, owner.0, path.into_inner(), status.inner()).await?;

    Ok(HttpResponse::Ok().json(StatusUpdated{
        msg: "Order status updated".to_string(),
        status: order.status
    }))
}

#[tracing::instrument(
    "Requesting delivery for order",
    skip(pool, owner)
)]
pub async fn request_delivery(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    owner: IsRestaurantOwner
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let delivery = create_delivery_for_order(conn, owner.0, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(delivery))
}

#[tracing::instrument(
    "Updating restaurant details",
    skip(pool, owner)
)]
pub async fn update_restaurant(
    pool: web::Data<DbPool>,
    body: web::Json<RestaurantUpdate>,
    owner: IsRestaurantOwner
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let changes = RestaurantOwnerChangeset{
        restaurant_name: optional_text("restaurant_name", body.restaurant_name)?,
        address: optional_text("address", body.address)?,
        hours_of_operation: optional_text("hours_of_operation", body.hours_of_operation)?
    };

    let conn = get_pooled_connection(&pool).await?;
    let restaurant = update_restaurant_details(conn, owner.0, changes).await?;

    Ok(HttpResponse::Ok().json(RestaurantUpdated{
        msg: "Restaurant details updated".to_string(),
        restaurant_name: restaurant.restaurant_name
    }))
}
