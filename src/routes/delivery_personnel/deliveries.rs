use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::extractors::IsDeliveryPersonnel, db_interaction::{accept_delivery, get_available_deliveries, set_delivery_availability, update_delivery_status, DeliveryStatusChangeset}, domain::StatusText, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct DeliveriesQuery{
    pub delivery_personnel_id: Option<Uuid>
}

#[derive(Deserialize, Debug)]
pub struct DeliveryStatusUpdate{
    pub status: String,
    pub delivery_time: Option<i32>
}

#[derive(Deserialize, Debug)]
pub struct AvailabilityUpdate{
    pub available: bool
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeliveryStatusUpdated{
    pub msg: String,
    pub status: String
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AvailabilityUpdated{
    pub msg: String,
    pub available: bool
}

#[tracing::instrument(
    "Viewing available deliveries",
    skip(pool, personnel)
)]
pub async fn view_available_deliveries(
    pool: web::Data<DbPool>,
    query: web::Query<DeliveriesQuery>,
    personnel: IsDeliveryPersonnel
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let deliveries = get_available_deliveries(conn, personnel.0, query.delivery_personnel_id).await?;

    if deliveries.is_empty() {
        return Err(ApiError::NotFound("No available deliveries found".to_string()));
    }

    Ok(HttpResponse::Ok().json(deliveries))
}

#[tracing::instrument(
    "Accepting delivery request",
    skip(pool, personnel)
)]
pub async fn accept_delivery_request(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    personnel: IsDeliveryPersonnel
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let delivery = accept_delivery(conn, personnel.0, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(DeliveryStatusUpdated{
        msg: "Delivery accepted".to_string(),
        status: delivery.status
    }))
}

#[tracing::instrument(
    "Updating delivery status",
    skip(pool, personnel)
)]
pub async fn update_status(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<DeliveryStatusUpdate>,
    personnel: IsDeliveryPersonnel
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let status = StatusText::parse(body.status).map_err(ApiError::BadRequest)?;

    if matches!(body.delivery_time, Some(minutes) if minutes < 0) {
        return Err(ApiError::BadRequest("delivery_time must not be negative".to_string()));
    }

    let changes = DeliveryStatusChangeset{
        status: status.inner(),
        delivery_time: body.delivery_time
    };

    let conn = get_pooled_connection(&pool).await?;
    let delivery = update_delivery_status(conn, personnel.0, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(DeliveryStatusUpdated{
        msg: "Delivery status updated".to_string(),
        status: delivery.status
    }))
}

#[tracing::instrument(
    "Updating availability",
    skip(pool, personnel)
)]
pub async fn update_availability(
    pool: web::Data<DbPool>,
    body: web::Json<AvailabilityUpdate>,
    personnel: IsDeliveryPersonnel
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let personnel = set_delivery_availability(conn, personnel.0, body.available).await?;

    Ok(HttpResponse::Ok().json(AvailabilityUpdated{
        msg: "Availability updated".to_string(),
        available: personnel.is_available
    }))
}
