use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::{auth::extractors::IsAdmin, db_interaction::{activity_report, average_delivery_time, order_trends, popular_restaurants}, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportType{
    PopularRestaurants,
    AverageDeliveryTime,
    OrderTrends
}

impl ReportType {
    pub fn parse(report_type: &str) -> Result<ReportType, ApiError> {
        match report_type {
            "popular_restaurants" => Ok(ReportType::PopularRestaurants),
            "average_delivery_time" => Ok(ReportType::AverageDeliveryTime),
            "order_trends" => Ok(ReportType::OrderTrends),
            _ => Err(ApiError::BadRequest("Invalid report type".to_string()))
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Report{
    pub report_type: String,
    pub data: serde_json::Value
}

#[tracing::instrument(
    "Generating report",
    skip(pool, _admin)
)]
pub async fn generate_report(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let report_type = path.into_inner();
    let kind = ReportType::parse(&report_type)?;

    let conn = get_pooled_connection(&pool).await?;
    let data = match kind {
        ReportType::PopularRestaurants => serde_json::to_value(popular_restaurants(conn).await?),
        ReportType::AverageDeliveryTime => serde_json::to_value(average_delivery_time(conn).await?),
        ReportType::OrderTrends => serde_json::to_value(order_trends(conn).await?)
    }
    .map_err(|e| ApiError::UnexpectedError(e.into()))?;

    Ok(HttpResponse::Ok().json(Report{ report_type, data }))
}

#[tracing::instrument(
    "Monitoring platform activity",
    skip_all
)]
pub async fn monitor_activity(
    pool: web::Data<DbPool>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(activity_report(conn).await?))
}
