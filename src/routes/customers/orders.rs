use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::extractors::IsCustomer, db_interaction::{get_customer_order, get_customer_orders, place_order, reorder}, domain::Amount, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct OrderRequest{
    pub restaurant_owner_id: Uuid,
    pub total_amount: i32
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OrderPlaced{
    pub msg: String,
    pub order_id: Uuid
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OrderTracking{
    pub order_id: Uuid,
    pub status: String
}

#[tracing::instrument(
    "Placing customer order",
    skip(pool, customer)
)]
pub async fn place_customer_order(
    pool: web::Data<DbPool>,
    body: web::Json<OrderRequest>,
    customer: IsCustomer
) -> Result<HttpResponse, ApiError> {
    let total_amount = Amount::parse("total_amount", body.total_amount)
        .map_err(ApiError::BadRequest)?;

    let conn = get_pooled_connection(&pool).await?;
    let order = place_order(conn, customer.0, body.restaurant_owner_id, total_amount.inner()).await?;

    Ok(HttpResponse::Ok().json(OrderPlaced{
        msg: "Order placed successfully".to_string(),
        order_id: order.id
    }))
}

#[tracing::instrument(
    "Tracking customer order",
    skip(pool, customer)
)]
pub async fn track_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    customer: IsCustomer
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let order = get_customer_order(conn, customer.0, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(OrderTracking{
        order_id: order.id,
        status: order.status
    }))
}

#[tracing::instrument(
    "Viewing order history",
    skip(pool, customer)
)]
pub async fn order_history(
    pool: web::Data<DbPool>,
    customer: IsCustomer
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let orders = get_customer_orders(conn, customer.0).await?;

    if orders.is_empty() {
        return Err(ApiError::NotFound("No past orders found".to_string()));
    }

    Ok(HttpResponse::Ok().json(orders))
}

#[tracing::instrument(
    "Reordering",
    skip(pool, customer)
)]
pub async fn reorder_previous(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    customer: IsCustomer
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let order = reorder(conn, customer.0, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(OrderPlaced{
        msg: "Order reordered successfully".to_string(),
        order_id: order.id
    }))
}
