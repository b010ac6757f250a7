use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::extractors::IsAdmin, db_interaction::{get_all_orders, update_order_status}, domain::StatusText, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct OrderStatusRequest{
    pub status: String
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OrderStatusChanged{
    pub msg: String
}

#[tracing::instrument(
    "Listing all orders",
    skip_all
)]
pub async fn view_all_orders(
    pool: web::Data<DbPool>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(get_all_orders(conn).await?))
}

#[tracing::instrument(
    "Overriding order status",
    skip(pool, _admin)
)]
pub async fn manage_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<OrderStatusRequest>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let status = StatusText::parse(body.into_inner().status).map_err(ApiError::BadRequest)?;

    let conn = get_pooled_connection(&pool).await?;
    let order = update_order_status(conn, path.into_inner(), status.inner()).await?;

    Ok(HttpResponse::Ok().json(OrderStatusChanged{
        msg: format!("Order {} updated to {}", order.id, order.status)
    }))
}
